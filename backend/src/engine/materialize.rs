//! # Document Materializer
//!
//! Turns a config, the customer's company profile and form input into a
//! stored document, and keeps that document in sync with later input.
//!
//! ## Workflow
//!
//! 1.  **Validating**: every declared placeholder is resolved and every
//!     declared table rendered. Missing required fields fail the request
//!     before any document is touched.
//!
//! 2.  **Creating**: the template is duplicated, tokens are substituted and
//!     each table anchor is turned into a table holding its rows. A
//!     `DocumentRecord` links the new document to customer and config.
//!
//! 3.  **Updating**: a fresh copy of the template is rendered in memory and
//!     its zones are copied into the existing document. Everything outside the
//!     zones stays as the user left it, apart from rows of tables that live
//!     outside every zone. Tables inside zones keep their rows across the
//!     replacement. The write is guarded by the document version.
//!
//! 4.  **Completed**: the final document is scanned for leftover tokens.
//!
//! Cleanup is a separate operation that only strips leftover tokens.

use crate::catalog::ConfigCatalog;
use crate::engine::aliases;
use crate::engine::resolver;
use crate::engine::tables::{self, RenderedTable, TableMode};
use crate::engine::tokens::{self, TokenMap};
use crate::engine::zones;
use crate::error::ServiceError;
use crate::store::{CustomerDirectory, DocumentStore, FirmenDatenStore, RecordStore};
use chrono::{NaiveDate, Utc};
use common::model::config::{DocumentConfig, TemplateType};
use common::model::customer::Customer;
use common::model::document::DocumentRecord;
use common::model::firmendaten::FirmenDaten;
use common::model::input::InputData;
use common::requests::UpdateMode;
use common::responses::{
    CleanupResponse, CreateAllResponse, CreatedDocument, FailedDocument, GenerationResponse,
};
use log::{debug, info, warn};
use rusqlite::Connection;

/// Builds the links users open documents with.
#[derive(Debug, Clone)]
pub struct DocumentUrls {
    editor_url: String,
}

impl DocumentUrls {
    pub fn new(editor_url: impl Into<String>) -> Self {
        Self {
            editor_url: editor_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn edit_url(&self, document_id: &str, template_type: TemplateType) -> String {
        let kind = match template_type {
            TemplateType::Document => "document",
            TemplateType::Spreadsheet => "spreadsheets",
        };
        format!("{}/{}/d/{}/edit", self.editor_url, kind, document_id)
    }
}

/// Resolved input for one config, ready to be written.
struct Prepared<'a> {
    config: &'a DocumentConfig,
    tokens: TokenMap,
    tables: Vec<RenderedTable>,
}

pub struct Materializer<'a, S> {
    catalog: &'a ConfigCatalog,
    urls: &'a DocumentUrls,
    documents: S,
    records: RecordStore<'a>,
    customers: CustomerDirectory<'a>,
    profiles: FirmenDatenStore<'a>,
    today: NaiveDate,
}

impl<'a, S: DocumentStore> Materializer<'a, S> {
    /// `today` feeds `autoToday` date placeholders.
    pub fn new(
        conn: &'a Connection,
        catalog: &'a ConfigCatalog,
        urls: &'a DocumentUrls,
        documents: S,
        today: NaiveDate,
    ) -> Self {
        Self {
            catalog,
            urls,
            documents,
            records: RecordStore::new(conn),
            customers: CustomerDirectory::new(conn),
            profiles: FirmenDatenStore::new(conn),
            today,
        }
    }

    /// Company profile of `customer`, completed with the directory's company
    /// name when the profile lacks one.
    fn firmendaten(&self, customer: &Customer) -> Result<FirmenDaten, ServiceError> {
        let profile = self.profiles.get(&customer.kunde_id)?;
        Ok(aliases::with_company_fallback(profile, &customer.company_name))
    }

    fn prepare(
        &self,
        config_id: &str,
        input: &InputData,
        firmendaten: Option<&FirmenDaten>,
    ) -> Result<Prepared<'a>, ServiceError> {
        let catalog: &'a ConfigCatalog = self.catalog;
        let config = catalog.get(config_id)?;
        let tokens = resolver::resolve_placeholders(
            &config.placeholders,
            &input.placeholders,
            firmendaten,
            Some(self.today),
        )?;
        let tables = tables::render_tables(&config.tables, &input.tables);
        Ok(Prepared {
            config,
            tokens,
            tables,
        })
    }

    fn template_id(config: &DocumentConfig) -> Result<&str, ServiceError> {
        if config.has_template() {
            Ok(&config.template_id)
        } else {
            Err(ServiceError::not_found("template", format!("(none for {})", config.id)))
        }
    }

    fn completed(
        &self,
        document_id: String,
        document_name: String,
        template_type: TemplateType,
    ) -> Result<GenerationResponse, ServiceError> {
        let stored = self.documents.fetch(&document_id)?;
        let unresolved_tokens = tokens::scan_unresolved(&stored.body);
        Ok(GenerationResponse {
            document_url: self.urls.edit_url(&document_id, template_type),
            document_id,
            document_name,
            unresolved_tokens,
            version: stored.version,
        })
    }

    /// Generates a new document of `config_id` for customer `kunde_id`.
    pub fn create(
        &self,
        kunde_id: &str,
        config_id: &str,
        input: &InputData,
    ) -> Result<GenerationResponse, ServiceError> {
        let customer = self.customers.get(kunde_id)?;
        let firmendaten = self.firmendaten(&customer)?;
        let prepared = self.prepare(config_id, input, Some(&firmendaten))?;
        let config = prepared.config;
        let template_id = Self::template_id(config)?;

        let document_id = self.documents.duplicate(template_id)?;
        let replaced = self.documents.substitute(&document_id, &prepared.tokens)?;
        for table in &prepared.tables {
            if !self
                .documents
                .insert_table_rows(&document_id, &table.name, &table.rows)?
            {
                warn!("template {} has no anchor for table {}", template_id, table.name);
            }
        }

        let document_name = format!("{} - {}", config.name, customer.company_name);
        self.records.create(&DocumentRecord {
            customer_id: kunde_id.to_string(),
            config_id: config.id.clone(),
            google_doc_id: document_id.clone(),
            document_name: document_name.clone(),
            template_type: config.template_type,
            created_at: Utc::now(),
        })?;

        let response = self.completed(document_id, document_name, config.template_type)?;
        info!(
            "created {} for customer {} as {} ({} replacements, {} unresolved)",
            config.id,
            kunde_id,
            response.document_id,
            replaced,
            response.unresolved_tokens.len()
        );
        Ok(response)
    }

    /// Regenerates the zones of an existing document from the current
    /// template.
    pub fn update(
        &self,
        document_id: &str,
        config_id: &str,
        input: &InputData,
        mode: UpdateMode,
        expected_version: Option<i64>,
    ) -> Result<GenerationResponse, ServiceError> {
        let record = self.records.find_by_document(document_id)?;
        let firmendaten = match &record {
            Some(record) => {
                let customer = self.customers.get(&record.customer_id)?;
                Some(self.firmendaten(&customer)?)
            }
            None => None,
        };
        let prepared = self.prepare(config_id, input, firmendaten.as_ref())?;
        let config = prepared.config;
        if let Some(record) = &record {
            if record.config_id != config.id {
                return Err(ServiceError::BadRequest(format!(
                    "document {} was generated from {}, not {}",
                    document_id, record.config_id, config.id
                )));
            }
        }
        let template_id = Self::template_id(config)?;

        let stored = self.documents.fetch(document_id)?;
        if let Some(expected) = expected_version {
            if expected != stored.version {
                return Err(ServiceError::Conflict {
                    document_id: document_id.to_string(),
                    expected,
                    found: stored.version,
                });
            }
        }

        let mut rendered = self.documents.template(template_id)?;
        tokens::substitute(&mut rendered, &prepared.tokens);
        let missing = tables::fill_anchors(&mut rendered, &prepared.tables);
        if !missing.is_empty() {
            warn!("template {} has no anchor for tables {:?}", template_id, missing);
        }

        let table_mode = match mode {
            UpdateMode::Replace => TableMode::Replace,
            _ => TableMode::Append,
        };
        let template_zones = zones::find_zones(&rendered)?;
        let zoned_tables = zones::tables_in_zones(&rendered, &template_zones);

        // Zone content is replaced wholesale, so rows of tables inside zones
        // are carried into the rendered copy first.
        let mut body = stored.body;
        for table in prepared
            .tables
            .iter()
            .filter(|table| zoned_tables.contains(&table.name))
        {
            let existing = body.table_rows(&table.name).unwrap_or_default();
            let rows = tables::carry_over(existing, &table.rows, table_mode);
            tables::apply_rows(&mut rendered, &table.name, &rows, TableMode::Replace, &[]);
        }

        let report = zones::merge_zones(&mut body, &rendered)?;
        debug!(
            "document {}: zones replaced {:?}, appended {:?}",
            document_id, report.replaced, report.appended
        );

        let excluded = zones::extents(&zones::find_zones(&body)?);
        for table in &prepared.tables {
            if table.rows.is_empty() || zoned_tables.contains(&table.name) {
                continue;
            }
            if !tables::apply_rows(&mut body, &table.name, &table.rows, table_mode, &excluded) {
                warn!("document {} has no table {}", document_id, table.name);
            }
        }

        let version = self.documents.write(document_id, &body, stored.version)?;
        let document_name = record
            .map(|record| record.document_name)
            .unwrap_or_else(|| config.name.clone());

        info!(
            "updated {} ({}) to version {}",
            document_id, config.id, version
        );
        Ok(GenerationResponse {
            document_url: self.urls.edit_url(document_id, config.template_type),
            document_id: document_id.to_string(),
            document_name,
            unresolved_tokens: tokens::scan_unresolved(&body),
            version,
        })
    }

    /// Strips every leftover `{{…}}` token. A clean document is left as is.
    pub fn cleanup(&self, document_id: &str) -> Result<CleanupResponse, ServiceError> {
        let (removed_tokens, version) = self.documents.remove_unresolved_tokens(document_id)?;
        if !removed_tokens.is_empty() {
            info!(
                "removed {} tokens from {}",
                removed_tokens.len(),
                document_id
            );
        }
        Ok(CleanupResponse {
            document_id: document_id.to_string(),
            changed: !removed_tokens.is_empty(),
            removed_tokens,
            version,
        })
    }

    /// Generates every document the customer does not have yet, using only
    /// the company profile and `autoToday` defaults as input. A failing config
    /// does not stop the others.
    pub fn create_all(&self, kunde_id: &str) -> Result<CreateAllResponse, ServiceError> {
        self.customers.get(kunde_id)?;

        let mut response = CreateAllResponse {
            kunde_id: kunde_id.to_string(),
            ..CreateAllResponse::default()
        };
        let input = InputData::default();

        for config in self.catalog.iter() {
            if !config.has_template()
                || self
                    .records
                    .find_by_customer_and_config(kunde_id, &config.id)?
                    .is_some()
            {
                response.skipped.push(config.id.clone());
                continue;
            }

            match self.create(kunde_id, &config.id, &input) {
                Ok(result) => response.created.push(CreatedDocument {
                    config_id: config.id.clone(),
                    result,
                }),
                Err(err) => {
                    warn!("could not create {} for {}: {}", config.id, kunde_id, err);
                    response.failed.push(FailedDocument {
                        config_id: config.id.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            "create all for {}: {} created, {} skipped, {} failed",
            kunde_id,
            response.created.len(),
            response.skipped.len(),
            response.failed.len()
        );
        Ok(response)
    }
}
