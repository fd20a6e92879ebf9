use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use common::model::customer::Customer;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const COLUMNS: &str = "kunde_id, company_name, folder_id, logo_url, created_at";

/// Minimal customer directory: id, company name, folder and logo link.
pub struct CustomerDirectory<'c> {
    conn: &'c Connection,
}

impl<'c> CustomerDirectory<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Registers a customer. Without a parent folder a fresh folder id is
    /// generated.
    pub fn create(
        &self,
        company_name: &str,
        parent_folder_id: Option<&str>,
    ) -> Result<Customer, ServiceError> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(ServiceError::BadRequest("companyName must not be empty".to_string()));
        }

        let customer = Customer {
            kunde_id: Uuid::new_v4().to_string(),
            company_name: company_name.to_string(),
            folder_id: parent_folder_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            logo_url: None,
            created_at: Utc::now(),
        };

        self.conn.execute(
            &format!("INSERT INTO customers ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![
                customer.kunde_id,
                customer.company_name,
                customer.folder_id,
                customer.logo_url,
                customer.created_at,
            ],
        )?;
        Ok(customer)
    }

    pub fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY company_name COLLATE NOCASE, created_at"
        ))?;
        let customers = stmt
            .query_map([], read_customer)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    pub fn get(&self, kunde_id: &str) -> Result<Customer, ServiceError> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM customers WHERE kunde_id = ?1"),
                params![kunde_id],
                read_customer,
            )
            .optional()?
            .ok_or_else(|| ServiceError::not_found("customer", kunde_id))
    }

    pub fn set_logo_url(&self, kunde_id: &str, logo_url: &str) -> Result<(), ServiceError> {
        let changed = self.conn.execute(
            "UPDATE customers SET logo_url = ?1 WHERE kunde_id = ?2",
            params![logo_url, kunde_id],
        )?;
        if changed == 0 {
            return Err(ServiceError::not_found("customer", kunde_id));
        }
        Ok(())
    }
}

fn read_customer(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        kunde_id: row.get(0)?,
        company_name: row.get(1)?,
        folder_id: row.get(2)?,
        logo_url: row.get(3)?,
        created_at: row.get::<_, DateTime<Utc>>(4)?,
    })
}
