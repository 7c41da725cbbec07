//! Report generation - dashboard summary, CSV report data, and the
//! printable shopping list.
//!
//! CSV reports are semicolon-delimited with a header row, matching the
//! files the previous system produced: Portuguese headers, no quoting or
//! escaping of embedded delimiters. The same report strings double as the
//! input handed to the external AI summarizer; the prompt call itself is
//! not this crate's concern.

use crate::{
    core::{department, employee, product, shopping_list, stock},
    entities::{shopping_list_item, stock_movement},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// Products with less stock than this count as "low stock" on the
/// dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many recent movements the dashboard shows.
const RECENT_MOVEMENTS: usize = 5;

/// Reports only include movements from this many days back.
const MOVEMENT_REPORT_DAYS: i64 = 30;

/// Aggregated numbers for the dashboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of catalog products
    pub total_products: usize,
    /// Sum of all product quantities
    pub total_stock: i64,
    /// Shopping-list items still pending
    pub pending_shopping_items: usize,
    /// Products below the low-stock threshold
    pub low_stock_items: usize,
    /// The five most recent ledger movements
    pub recent_movements: Vec<stock_movement::Model>,
}

/// The five report types the reports page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Current status of every product
    Stock,
    /// Ledger movements from the last month
    Movements,
    /// Pending shopping-list items
    Purchases,
    /// Per-employee movement and shopping-list activity
    EmployeeActivity,
    /// Short-delivered items
    MissingItems,
}

impl ReportType {
    /// Human-readable report title, also used as the summarizer's
    /// report-type label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Stock => "Relatório de Estoque",
            Self::Movements => "Relatório de Movimentações",
            Self::Purchases => "Relatório de Compras",
            Self::EmployeeActivity => "Atividades dos Funcionários",
            Self::MissingItems => "Relatório de Itens Faltantes",
        }
    }

    /// Download file name for the generated CSV.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Stock => "relatorio_estoque.csv",
            Self::Movements => "relatorio_movimentações.csv",
            Self::Purchases => "relatorio_compras.csv",
            Self::EmployeeActivity => "relatorio_atividades_dos_funcionários.csv",
            Self::MissingItems => "relatorio_itens_faltantes.csv",
        }
    }
}

/// Computes the dashboard summary in one pass over the catalog, shopping
/// list, and ledger.
///
/// # Errors
/// Returns an error if any of the underlying queries fail.
pub async fn get_dashboard_summary(db: &DatabaseConnection) -> Result<DashboardSummary> {
    let products = product::get_all_products(db).await?;
    let items = shopping_list::get_shopping_list(db).await?;
    let movements = stock::get_all_movements(db).await?;

    Ok(DashboardSummary {
        total_products: products.len(),
        total_stock: products.iter().map(|p| p.quantity).sum(),
        pending_shopping_items: items
            .iter()
            .filter(|item| item.status == shopping_list_item::STATUS_PENDING)
            .count(),
        low_stock_items: products
            .iter()
            .filter(|p| p.quantity < LOW_STOCK_THRESHOLD)
            .count(),
        recent_movements: movements.into_iter().take(RECENT_MOVEMENTS).collect(),
    })
}

/// Generates the CSV data for one report type: semicolon-delimited, header
/// row plus data rows, newline-separated. Embedded delimiters are not
/// quoted or escaped (the format the previous system produced).
///
/// # Errors
/// Returns an error if any of the underlying queries fail.
pub async fn generate_report(db: &DatabaseConnection, report_type: ReportType) -> Result<String> {
    let products = product::get_all_products(db).await?;
    let product_names: HashMap<i64, &str> =
        products.iter().map(|p| (p.id, p.name.as_str())).collect();

    let (headers, rows): (Vec<&str>, Vec<Vec<String>>) = match report_type {
        ReportType::Stock => (
            vec!["Nome", "Descrição", "Quantidade"],
            products
                .iter()
                .map(|p| {
                    vec![
                        p.name.clone(),
                        p.description.clone().unwrap_or_default(),
                        p.quantity.to_string(),
                    ]
                })
                .collect(),
        ),
        ReportType::Movements => {
            let cutoff = chrono::Utc::now() - chrono::Duration::days(MOVEMENT_REPORT_DAYS);
            let movements = stock::get_all_movements(db).await?;
            (
                vec![
                    "ID",
                    "ID do Produto",
                    "Nome do Produto",
                    "Quantidade",
                    "Tipo",
                    "Data",
                    "ID do Funcionário",
                ],
                movements
                    .iter()
                    .filter(|m| m.date > cutoff)
                    .map(|m| {
                        vec![
                            m.id.to_string(),
                            m.product_id.to_string(),
                            lookup(&product_names, m.product_id),
                            m.quantity.to_string(),
                            m.movement_type.clone(),
                            m.date.to_rfc3339(),
                            m.employee_id.map(|id| id.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect(),
            )
        }
        ReportType::Purchases => {
            let items = shopping_list::get_shopping_list(db).await?;
            (
                vec!["ID", "ID do Produto", "Nome do Produto", "Quantidade", "Status"],
                items
                    .iter()
                    .filter(|item| item.status == shopping_list_item::STATUS_PENDING)
                    .map(|item| {
                        vec![
                            item.id.to_string(),
                            item.product_id.to_string(),
                            lookup(&product_names, item.product_id),
                            item.quantity.to_string(),
                            item.status.clone(),
                        ]
                    })
                    .collect(),
            )
        }
        ReportType::EmployeeActivity => {
            let employees = employee::get_all_employees(db).await?;
            let employee_names: HashMap<i64, &str> =
                employees.iter().map(|e| (e.id, e.name.as_str())).collect();
            let movements = stock::get_all_movements(db).await?;
            let items = shopping_list::get_shopping_list(db).await?;

            let mut rows: Vec<Vec<String>> = movements
                .iter()
                .map(|m| {
                    vec![
                        m.employee_id
                            .map_or_else(|| "N/A".to_string(), |id| id.to_string()),
                        m.employee_id
                            .map_or_else(|| "N/A".to_string(), |id| lookup(&employee_names, id)),
                        format!("Movimentação de Estoque {}", m.movement_type),
                        lookup(&product_names, m.product_id),
                        m.quantity.to_string(),
                        m.date.to_rfc3339(),
                    ]
                })
                .collect();
            rows.extend(items.iter().map(|item| {
                vec![
                    item.employee_id
                        .map_or_else(|| "N/A".to_string(), |id| id.to_string()),
                    item.employee_id
                        .map_or_else(|| "N/A".to_string(), |id| lookup(&employee_names, id)),
                    "Adicionado à Lista de Compras".to_string(),
                    lookup(&product_names, item.product_id),
                    item.quantity.to_string(),
                    item.created_at.to_rfc3339(),
                ]
            }));

            (
                vec![
                    "ID do Funcionário",
                    "Nome do Funcionário",
                    "Tipo de Ação",
                    "Nome do Produto",
                    "Quantidade",
                    "Data",
                ],
                rows,
            )
        }
        ReportType::MissingItems => {
            let employees = employee::get_all_employees(db).await?;
            let employee_names: HashMap<i64, &str> =
                employees.iter().map(|e| (e.id, e.name.as_str())).collect();
            let missing = get_all_missing_items(db).await?;
            (
                vec![
                    "ID do Produto",
                    "Nome do Produto",
                    "Quantidade Faltante",
                    "Data do Relatório",
                    "Reportado por",
                ],
                missing
                    .iter()
                    .map(|item| {
                        vec![
                            item.product_id.to_string(),
                            lookup(&product_names, item.product_id),
                            item.quantity_missing.to_string(),
                            item.reported_at.format("%d/%m/%Y %H:%M:%S").to_string(),
                            item.employee_id.map_or_else(
                                || "Sistema".to_string(),
                                |id| lookup(&employee_names, id),
                            ),
                        ]
                    })
                    .collect(),
            )
        }
    };

    let mut lines = vec![headers.join(";")];
    lines.extend(rows.iter().map(|row| row.join(";")));
    Ok(lines.join("\n"))
}

/// Retrieves every shortfall record.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_missing_items(
    db: &DatabaseConnection,
) -> Result<Vec<crate::entities::missing_item::Model>> {
    use sea_orm::EntityTrait;
    crate::entities::MissingItem::find()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renders the printable shopping list: a standalone HTML document with
/// one table row per pending item (product, requesting department,
/// quantity).
///
/// # Errors
/// Returns an error if any of the underlying queries fail.
pub async fn render_shopping_list_print(db: &DatabaseConnection) -> Result<String> {
    let items = shopping_list::get_shopping_list(db).await?;
    let products = product::get_all_products(db).await?;
    let departments = department::get_all_departments(db).await?;

    let product_names: HashMap<i64, &str> =
        products.iter().map(|p| (p.id, p.name.as_str())).collect();
    let department_names: HashMap<i64, &str> = departments
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();

    let mut body_rows = String::new();
    for item in items
        .iter()
        .filter(|item| item.status == shopping_list_item::STATUS_PENDING)
    {
        let product = product_names
            .get(&item.product_id)
            .copied()
            .unwrap_or("N/A");
        let department = department_names
            .get(&item.department_id)
            .copied()
            .unwrap_or("N/A");
        body_rows.push_str(&format!(
            "<tr><td>{product}</td><td>{department}</td><td>{}</td></tr>\n",
            item.quantity
        ));
    }

    let generated_at = chrono::Utc::now().format("%d/%m/%Y %H:%M:%S");
    Ok(format!(
        r#"<html>
  <head>
    <title>Lista de Compras - Pimenta de Cheiro</title>
    <style>
      body {{ font-family: sans-serif; line-height: 1.5; padding: 2rem; }}
      table {{ width: 100%; border-collapse: collapse; margin-top: 1.5rem; }}
      th, td {{ border: 1px solid #ddd; padding: 12px; text-align: left; }}
      th {{ background-color: #f2f2f2; }}
    </style>
  </head>
  <body>
    <h1>Lista de Compras</h1>
    <p>Gerado em: {generated_at}</p>
    <table>
      <thead>
        <tr><th>Produto</th><th>Setor Solicitante</th><th>Quantidade</th></tr>
      </thead>
      <tbody>
{body_rows}      </tbody>
    </table>
  </body>
</html>
"#
    ))
}

fn lookup(names: &HashMap<i64, &str>, id: i64) -> String {
    names.get(&id).copied().unwrap_or("N/A").to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::shopping_list::{
        receive_shopping_list_item, set_shopping_list_item_status,
    };
    use crate::entities::{StockMovement, shopping_list_item::STATUS_PURCHASED, stock_movement};
    use crate::test_utils::*;
    use crate::validate::MovementInput;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    #[tokio::test]
    async fn test_stock_report_shape() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product(&db, "Pimenta", 12, vec![]).await?;
        create_test_product(&db, "Urucum", 3, vec![]).await?;

        let csv = generate_report(&db, ReportType::Stock).await?;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Nome;Descrição;Quantidade");
        assert_eq!(lines[1], "Pimenta;;12");
        assert_eq!(lines[2], "Urucum;;3");

        Ok(())
    }

    #[tokio::test]
    async fn test_purchases_report_lists_pending_only() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
        let pending = create_test_item(&db, product.id, department.id, 4).await?;
        let bought = create_test_item(&db, product.id, department.id, 2).await?;
        set_shopping_list_item_status(&db, bought.id, STATUS_PURCHASED).await?;

        let csv = generate_report(&db, ReportType::Purchases).await?;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "ID;ID do Produto;Nome do Produto;Quantidade;Status"
        );
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(&format!("{};", pending.id)));
        assert!(lines[1].ends_with(";pending"));

        Ok(())
    }

    #[tokio::test]
    async fn test_movements_report_filters_old_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Pimenta", 5, vec![]).await?;

        // A fresh movement through the normal path
        crate::core::stock::record_movement(
            &db,
            MovementInput {
                product_id: product.id,
                quantity: 2,
                movement_type: "entry".to_string(),
                employee_id: None,
            },
        )
        .await?;

        // A stale row inserted directly, dated outside the window
        let stale = stock_movement::ActiveModel {
            product_id: Set(product.id),
            quantity: Set(1),
            movement_type: Set("exit".to_string()),
            date: Set(chrono::Utc::now() - chrono::Duration::days(45)),
            employee_id: Set(None),
            metadata: Set(None),
            ..Default::default()
        };
        stale.insert(&db).await?;
        assert_eq!(StockMovement::find().all(&db).await?.len(), 2);

        let csv = generate_report(&db, ReportType::Movements).await?;
        let lines: Vec<&str> = csv.lines().collect();
        // Header plus the one recent movement
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(";entry;"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_items_report_names_and_fallbacks() -> Result<()> {
        let db = setup_test_db().await?;
        let (_, item) = {
            let department = create_test_department(&db, "Kitchen").await?;
            let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
            let item = create_test_item(&db, product.id, department.id, 10).await?;
            set_shopping_list_item_status(&db, item.id, STATUS_PURCHASED).await?;
            (product, item)
        };
        receive_shopping_list_item(&db, item.id, 6).await?;

        let csv = generate_report(&db, ReportType::MissingItems).await?;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "ID do Produto;Nome do Produto;Quantidade Faltante;Data do Relatório;Reportado por"
        );
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(";Pimenta;4;"));
        // Item had no employee attached, so the reporter falls back
        assert!(lines[1].ends_with(";Sistema"));

        Ok(())
    }

    #[tokio::test]
    async fn test_employee_activity_report_merges_both_sources() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 5, vec![department.id]).await?;
        create_test_item(&db, product.id, department.id, 3).await?;
        crate::core::stock::record_movement(
            &db,
            MovementInput {
                product_id: product.id,
                quantity: 2,
                movement_type: "exit".to_string(),
                employee_id: None,
            },
        )
        .await?;

        let csv = generate_report(&db, ReportType::EmployeeActivity).await?;
        assert!(csv.contains("Movimentação de Estoque exit"));
        assert!(csv.contains("Adicionado à Lista de Compras"));

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_summary_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let low = create_test_product(&db, "Pimenta", 4, vec![department.id]).await?;
        create_test_product(&db, "Urucum", 50, vec![]).await?;
        create_test_item(&db, low.id, department.id, 3).await?;

        let summary = get_dashboard_summary(&db).await?;
        assert_eq!(summary.total_products, 2);
        assert_eq!(summary.total_stock, 54);
        assert_eq!(summary.pending_shopping_items, 1);
        assert_eq!(summary.low_stock_items, 1);
        assert!(summary.recent_movements.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_print_view_lists_pending_rows_only() -> Result<()> {
        let db = setup_test_db().await?;
        let department = create_test_department(&db, "Kitchen").await?;
        let product = create_test_product(&db, "Pimenta", 0, vec![department.id]).await?;
        create_test_item(&db, product.id, department.id, 4).await?;
        let bought = create_test_item(&db, product.id, department.id, 9).await?;
        set_shopping_list_item_status(&db, bought.id, STATUS_PURCHASED).await?;

        let html = render_shopping_list_print(&db).await?;
        assert!(html.contains("Lista de Compras - Pimenta de Cheiro"));
        assert!(html.contains("<td>Pimenta</td><td>Kitchen</td><td>4</td>"));
        assert!(!html.contains("<td>9</td>"));

        Ok(())
    }

    #[test]
    fn test_report_type_labels() {
        assert_eq!(ReportType::Stock.file_name(), "relatorio_estoque.csv");
        assert_eq!(ReportType::Stock.title(), "Relatório de Estoque");
        assert_eq!(
            ReportType::MissingItems.title(),
            "Relatório de Itens Faltantes"
        );
    }
}
