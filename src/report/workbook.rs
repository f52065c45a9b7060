//! Workbook export
//!
//! Writes all five report views into one xlsx workbook: Executive
//! Summary, Budget Detail, Quote Comparison, Recent Activity, and
//! Decisions Needed. Every sheet is derived fresh from [`ReportData`]
//! at export time.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::budget::BudgetDetailRow;
use super::summary::Health;
use super::{
    budget_detail, decisions_needed, executive_summary, quote_comparison, recent_activity,
    ReportData, ReportError,
};

/// Default export filename: `<product>-<Report-type>-<YYYY-MM-DD>.xlsx`
pub fn default_filename(product: &str, report_type: &str, date: NaiveDate) -> String {
    format!("{}-{}-{}.xlsx", product, report_type, date.format("%Y-%m-%d"))
}

/// Reusable cell formats shared across sheets
struct Formats {
    header: Format,
    text: Format,
    money: Format,
    money_bold: Format,
    integer: Format,
    on_track: Format,
    at_risk: Format,
    blocked: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(0xD9E1F2)
                .set_font_color(0x1F3864),
            text: Format::new(),
            money: Format::new().set_num_format("#,##0.00"),
            money_bold: Format::new().set_bold().set_num_format("#,##0.00"),
            integer: Format::new().set_num_format("#,##0"),
            on_track: Format::new().set_background_color(0xC6EFCE).set_font_color(0x006100),
            at_risk: Format::new().set_background_color(0xFFEB9C).set_font_color(0x9C6500),
            blocked: Format::new().set_background_color(0xFFC7CE).set_font_color(0x9C0006),
        }
    }

    fn health(&self, health: Health) -> &Format {
        match health {
            Health::OnTrack => &self.on_track,
            Health::AtRisk => &self.at_risk,
            Health::Blocked => &self.blocked,
        }
    }
}

fn wb_err(e: XlsxError) -> ReportError {
    ReportError::Workbook(e.to_string())
}

/// Export all five report sheets to `path`
pub fn export(data: &ReportData, now: DateTime<Utc>, path: &Path) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();

    write_summary_sheet(workbook.add_worksheet(), data, now, &formats)?;
    write_budget_sheet(workbook.add_worksheet(), data, &formats)?;
    write_quotes_sheet(workbook.add_worksheet(), data, &formats)?;
    write_activity_sheet(workbook.add_worksheet(), data, now, &formats)?;
    write_decisions_sheet(workbook.add_worksheet(), data, now, &formats)?;

    workbook.save(path).map_err(wb_err)?;
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], formats: &Formats) -> Result<(), ReportError> {
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, &formats.header)
            .map_err(wb_err)?;
    }
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    data: &ReportData,
    now: DateTime<Utc>,
    formats: &Formats,
) -> Result<(), ReportError> {
    sheet.set_name("Executive Summary").map_err(wb_err)?;
    write_headers(
        sheet,
        &[
            "Project", "Status", "Budgeted", "Actual", "Variance", "Variance %",
            "Open Tasks", "Overdue", "Blocking", "Decisions", "Health",
        ],
        formats,
    )?;

    for (i, row) in executive_summary(data, now).iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_with_format(r, 0, &row.project_name, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 1, row.status.to_string(), &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 2, row.budgeted, &formats.money).map_err(wb_err)?;
        sheet.write_with_format(r, 3, row.actual, &formats.money).map_err(wb_err)?;
        sheet.write_with_format(r, 4, row.variance, &formats.money).map_err(wb_err)?;
        match row.variance_percent {
            Some(pct) => {
                sheet.write_with_format(r, 5, pct / 100.0, &Format::new().set_num_format("0.0%"))
                    .map_err(wb_err)?;
            }
            None => {
                sheet.write_with_format(r, 5, "", &formats.text).map_err(wb_err)?;
            }
        }
        sheet.write_with_format(r, 6, row.open_tasks as f64, &formats.integer).map_err(wb_err)?;
        sheet.write_with_format(r, 7, row.overdue_tasks as f64, &formats.integer).map_err(wb_err)?;
        sheet.write_with_format(r, 8, row.blocking_tasks as f64, &formats.integer).map_err(wb_err)?;
        sheet.write_with_format(r, 9, row.decisions_needed as f64, &formats.integer).map_err(wb_err)?;
        sheet.write_with_format(r, 10, row.health.label(), formats.health(row.health)).map_err(wb_err)?;
    }

    sheet.set_column_width(0, 28).map_err(wb_err)?;
    sheet.set_column_width(10, 12).map_err(wb_err)?;
    Ok(())
}

fn write_budget_sheet(
    sheet: &mut Worksheet,
    data: &ReportData,
    formats: &Formats,
) -> Result<(), ReportError> {
    sheet.set_name("Budget Detail").map_err(wb_err)?;
    write_headers(
        sheet,
        &["Project", "Area", "Item", "Budgeted", "Actual", "Variance"],
        formats,
    )?;

    let write_opt = |sheet: &mut Worksheet, r: u32, c: u16, v: Option<f64>| -> Result<(), ReportError> {
        match v {
            Some(v) => sheet.write_with_format(r, c, v, &formats.money).map_err(wb_err)?,
            None => sheet.write_with_format(r, c, "", &formats.text).map_err(wb_err)?,
        };
        Ok(())
    };

    for (i, row) in budget_detail(data).iter().enumerate() {
        let r = (i + 1) as u32;
        match row {
            BudgetDetailRow::Item { project, area, name, budgeted, actual, variance } => {
                sheet.write_with_format(r, 0, project, &formats.text).map_err(wb_err)?;
                sheet.write_with_format(r, 1, area, &formats.text).map_err(wb_err)?;
                sheet.write_with_format(r, 2, name, &formats.text).map_err(wb_err)?;
                write_opt(sheet, r, 3, *budgeted)?;
                write_opt(sheet, r, 4, *actual)?;
                write_opt(sheet, r, 5, *variance)?;
            }
            BudgetDetailRow::AreaSubtotal { project, area, budgeted, actual, variance } => {
                sheet.write_with_format(r, 0, project, &formats.text).map_err(wb_err)?;
                sheet.write_with_format(r, 1, area, &formats.text).map_err(wb_err)?;
                sheet
                    .write_with_format(r, 2, format!("{} subtotal", area), &formats.header)
                    .map_err(wb_err)?;
                sheet.write_with_format(r, 3, *budgeted, &formats.money_bold).map_err(wb_err)?;
                sheet.write_with_format(r, 4, *actual, &formats.money_bold).map_err(wb_err)?;
                sheet.write_with_format(r, 5, *variance, &formats.money_bold).map_err(wb_err)?;
            }
            BudgetDetailRow::ProjectTotal { project, budgeted, actual, variance } => {
                sheet.write_with_format(r, 0, project, &formats.text).map_err(wb_err)?;
                sheet
                    .write_with_format(r, 2, format!("{} total", project), &formats.header)
                    .map_err(wb_err)?;
                sheet.write_with_format(r, 3, *budgeted, &formats.money_bold).map_err(wb_err)?;
                sheet.write_with_format(r, 4, *actual, &formats.money_bold).map_err(wb_err)?;
                sheet.write_with_format(r, 5, *variance, &formats.money_bold).map_err(wb_err)?;
            }
        }
    }

    sheet.set_column_width(0, 24).map_err(wb_err)?;
    sheet.set_column_width(1, 20).map_err(wb_err)?;
    sheet.set_column_width(2, 28).map_err(wb_err)?;
    Ok(())
}

fn write_quotes_sheet(
    sheet: &mut Worksheet,
    data: &ReportData,
    formats: &Formats,
) -> Result<(), ReportError> {
    sheet.set_name("Quote Comparison").map_err(wb_err)?;
    write_headers(
        sheet,
        &["Project", "Quote", "Vendor", "Trade", "Quoted", "Budget", "Variance", "Status"],
        formats,
    )?;

    for (i, row) in quote_comparison(data).iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_with_format(r, 0, &row.project_name, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 1, &row.title, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 2, row.vendor_name.as_deref().unwrap_or(""), &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 3, row.trade_name.as_deref().unwrap_or(""), &formats.text).map_err(wb_err)?;
        for (col, value) in [(4, row.amount), (5, row.budget_amount), (6, row.variance)] {
            match value {
                Some(v) => sheet.write_with_format(r, col, v, &formats.money).map_err(wb_err)?,
                None => sheet.write_with_format(r, col, "", &formats.text).map_err(wb_err)?,
            };
        }
        sheet.write_with_format(r, 7, row.status.to_string(), &formats.text).map_err(wb_err)?;
    }

    sheet.set_column_width(0, 24).map_err(wb_err)?;
    sheet.set_column_width(1, 28).map_err(wb_err)?;
    sheet.set_column_width(2, 24).map_err(wb_err)?;
    Ok(())
}

fn write_activity_sheet(
    sheet: &mut Worksheet,
    data: &ReportData,
    now: DateTime<Utc>,
    formats: &Formats,
) -> Result<(), ReportError> {
    sheet.set_name("Recent Activity").map_err(wb_err)?;
    write_headers(sheet, &["When", "Record", "Field", "From", "To", "By"], formats)?;

    for (i, row) in recent_activity(data, now).iter().enumerate() {
        let r = (i + 1) as u32;
        sheet
            .write_with_format(r, 0, row.at.format("%Y-%m-%d %H:%M").to_string(), &formats.text)
            .map_err(wb_err)?;
        sheet.write_with_format(r, 1, row.record_label, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 2, row.field_label, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 3, &row.old, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 4, &row.new, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 5, &row.author, &formats.text).map_err(wb_err)?;
    }

    sheet.set_column_width(0, 18).map_err(wb_err)?;
    sheet.set_column_width(2, 20).map_err(wb_err)?;
    Ok(())
}

fn write_decisions_sheet(
    sheet: &mut Worksheet,
    data: &ReportData,
    now: DateTime<Utc>,
    formats: &Formats,
) -> Result<(), ReportError> {
    sheet.set_name("Decisions Needed").map_err(wb_err)?;
    write_headers(sheet, &["Why", "Project", "Item", "Days Waiting", "Amount"], formats)?;

    for (i, row) in decisions_needed(data, now).iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_with_format(r, 0, row.kind.label(), &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 1, &row.project_name, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 2, &row.title, &formats.text).map_err(wb_err)?;
        sheet.write_with_format(r, 3, row.days_waiting as f64, &formats.integer).map_err(wb_err)?;
        match row.amount {
            Some(v) => sheet.write_with_format(r, 4, v, &formats.money).map_err(wb_err)?,
            None => sheet.write_with_format(r, 4, "", &formats.text).map_err(wb_err)?,
        };
    }

    sheet.set_column_width(0, 24).map_err(wb_err)?;
    sheet.set_column_width(1, 24).map_err(wb_err)?;
    sheet.set_column_width(2, 28).map_err(wb_err)?;
    Ok(())
}
