use crate::config::Language;
use crate::schema::AllocationResult;
use crate::utils::format_fixed;

/// Builds the notification sent to the secondary party. Only the `period`
/// and numeric fields of `result` are read.
pub fn build_message(result: &AllocationResult, language: Language, currency: &str) -> String {
    let period = result.period;
    let secondary_kwh = format_fixed(result.secondary_usage, 0);
    let secondary_pct = format_fixed(result.secondary_percent, 1);
    let secondary_share = format_fixed(result.secondary_share, 2);
    let total_kwh = format_fixed(result.total_usage, 0);
    let total_bill = format_fixed(result.total_bill, 2);

    match language {
        Language::German => format!(
            "Hoi Nachbar, hier die Stromabrechnung für {period}.\n\
             Dein Anteil für {secondary_kwh} kWh ({secondary_pct}%) beträgt {currency} {secondary_share}.\n\
             \n\
             Total Ladestationen: {total_kwh} kWh\n\
             Total Rechnung: {currency} {total_bill}\n\
             \n\
             Danke und Gruss!"
        ),
        Language::English => format!(
            "Hi neighbour, here is the electricity bill for {period}.\n\
             Your share for {secondary_kwh} kWh ({secondary_pct}%) comes to {currency} {secondary_share}.\n\
             \n\
             Total charging stations: {total_kwh} kWh\n\
             Total bill: {currency} {total_bill}\n\
             \n\
             Thanks and regards!"
        ),
    }
}
