//! Database seeder for Libros development and testing.
//!
//! Seeds a small demo chart of accounts. Parents are created before their
//! children so the hierarchy resolver can place every code.
//!
//! Usage: cargo run --bin seeder

use libros_db::AccountRepository;
use libros_db::entities::sea_orm_active_enums::AccountType;
use libros_db::repositories::{AccountError, CreateAccountInput};

/// Demo chart, ordered so ancestors come first.
const DEMO_CHART: &[(&str, &str, AccountType)] = &[
    ("1000", "Caja", AccountType::Asset),
    ("1100", "Bancos", AccountType::Asset),
    ("1200", "Cuentas por Cobrar", AccountType::Asset),
    ("10000001", "Caja Chica", AccountType::Asset),
    ("11000001", "Banco Nacional", AccountType::Asset),
    ("2000", "Cuentas por Pagar", AccountType::Liability),
    ("2100", "Prestamos Bancarios", AccountType::Liability),
    ("3000", "Capital Social", AccountType::Equity),
    ("4000", "Ingresos por Ventas", AccountType::Revenue),
    ("40000001", "Ventas al Contado", AccountType::Revenue),
    ("5000", "Gastos de Operacion", AccountType::Expense),
    ("50000001", "Sueldos y Salarios", AccountType::Expense),
    ("50000002", "Alquiler", AccountType::Expense),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = libros_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo chart of accounts...");
    let repo = AccountRepository::new(db);

    for &(code, name, account_type) in DEMO_CHART {
        match repo
            .create_account(CreateAccountInput {
                code: code.to_string(),
                name: name.to_string(),
                account_type,
            })
            .await
        {
            Ok(row) => println!(
                "  Created {} (level {}, parent: {})",
                row.account.label(),
                row.account.level,
                row.parent_label.as_deref().unwrap_or("none"),
            ),
            Err(AccountError::DuplicateCode(_)) => {
                println!("  {code} already exists, skipping...");
            }
            Err(e) => panic!("Failed to seed account {code}: {e}"),
        }
    }

    println!("Seeding complete!");
}
