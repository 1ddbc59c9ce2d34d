use crate::db::bank::BankSummary;
use std::time::{Duration, UNIX_EPOCH};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

pub fn format_bank_date(timestamp: u64) -> String {
    let created = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Local> = created.into();

    let today = chrono::Local::now();
    let created_date = datetime.date_naive();

    if created_date == today.date_naive() {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if created_date == today.date_naive() - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

pub fn format_bank_item(bank: &BankSummary) -> String {
    format!(
        "{} ({} questions) - {}",
        bank.name,
        bank.question_count,
        format_bank_date(bank.created_at)
    )
}
