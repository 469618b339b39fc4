use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use dukkan_customers::Customer;
use dukkan_invoicing::{InstallmentStatus, Invoice, InvoiceType};

/// Dashboard summary tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Sum of `final_amount` across all invoices.
    pub total_sales: i64,
    pub total_customers: usize,
    /// Installments still awaiting payment (not yet flagged late).
    pub active_installments: usize,
    /// Installments flagged late by the reconciliation pass.
    pub overdue_installments: usize,
    /// Net outstanding balance over non-installment invoices. Unfiltered:
    /// overpayment credits count against debt, matching the source figures.
    pub total_debts: i64,
}

impl Stats {
    pub fn compute(invoices: &[Invoice], customers: &[Customer]) -> Self {
        let mut active_installments = 0;
        let mut overdue_installments = 0;
        for invoice in invoices {
            for installment in &invoice.installments {
                match installment.status {
                    InstallmentStatus::Unpaid => active_installments += 1,
                    InstallmentStatus::Late => overdue_installments += 1,
                    InstallmentStatus::Paid => {}
                }
            }
        }

        let total_debts = invoices
            .iter()
            .filter(|inv| inv.kind != InvoiceType::Installment)
            .map(|inv| inv.remaining_amount)
            .sum();

        Self {
            total_sales: invoices.iter().map(|inv| inv.final_amount).sum(),
            total_customers: customers.len(),
            active_installments,
            overdue_installments,
            total_debts,
        }
    }
}

/// One bar of the dashboard sales chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: i64,
}

/// Sales totals for the trailing `days`-day window ending at `today`,
/// oldest day first. Days without sales appear with a zero total.
pub fn daily_sales(invoices: &[Invoice], today: NaiveDate, days: u32) -> Vec<DailySales> {
    (0..days)
        .rev()
        .map(|back| {
            let date = today - Duration::days(i64::from(back));
            let total = invoices
                .iter()
                .filter(|inv| inv.date == date)
                .map(|inv| inv.final_amount)
                .sum();
            DailySales { date, total }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dukkan_core::{CustomerId, InvoiceId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(kind: InvoiceType, date: NaiveDate, final_amount: i64, remaining: i64) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            customer_id: CustomerId::new(),
            customer_name: "C".to_string(),
            date,
            kind,
            items: vec![],
            total_amount: final_amount,
            discount: 0,
            final_amount,
            paid_amount: final_amount - remaining,
            remaining_amount: remaining,
            notes: None,
            months: None,
            installments: vec![],
        }
    }

    fn customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "C".to_string(),
            phone: String::new(),
            address: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn stats_fold_the_whole_book() {
        let mut with_schedule = invoice(InvoiceType::Installment, date(2024, 5, 1), 600_000, 600_000);
        with_schedule.installments = dukkan_invoicing::generate_schedule(
            600_000,
            3,
            date(2024, 5, 1),
            with_schedule.customer_id,
            "C",
        );
        with_schedule.installments[0].status = InstallmentStatus::Late;
        with_schedule.installments[1].status = InstallmentStatus::Paid;

        let invoices = vec![
            invoice(InvoiceType::Cash, date(2024, 5, 1), 1_750_000, 0),
            invoice(InvoiceType::Credit, date(2024, 5, 2), 1_000_000, 600_000),
            with_schedule,
        ];
        let customers = vec![customer(), customer()];

        let stats = Stats::compute(&invoices, &customers);
        assert_eq!(stats.total_sales, 1_750_000 + 1_000_000 + 600_000);
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.active_installments, 1);
        assert_eq!(stats.overdue_installments, 1);
        // Installment remainder excluded; only the credit invoice counts.
        assert_eq!(stats.total_debts, 600_000);
    }

    #[test]
    fn credit_balances_net_against_debt() {
        let invoices = vec![
            invoice(InvoiceType::Credit, date(2024, 5, 1), 100_000, 100_000),
            invoice(InvoiceType::Credit, date(2024, 5, 2), 100_000, -30_000),
        ];

        let stats = Stats::compute(&invoices, &[]);
        assert_eq!(stats.total_debts, 70_000);
    }

    #[test]
    fn daily_sales_covers_the_window_oldest_first() {
        let today = date(2024, 5, 7);
        let invoices = vec![
            invoice(InvoiceType::Cash, date(2024, 5, 7), 300, 0),
            invoice(InvoiceType::Cash, date(2024, 5, 5), 200, 0),
            invoice(InvoiceType::Cash, date(2024, 5, 5), 100, 0),
            // Outside the window.
            invoice(InvoiceType::Cash, date(2024, 4, 30), 999, 0),
        ];

        let series = daily_sales(&invoices, today, 7);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, date(2024, 5, 1));
        assert_eq!(series[0].total, 0);
        assert_eq!(series[4].date, date(2024, 5, 5));
        assert_eq!(series[4].total, 300);
        assert_eq!(series[6].date, today);
        assert_eq!(series[6].total, 300);
    }
}
