use crate::formatters::EMPTY_MESSAGE;
use crate::rank::RankedList;

/// Configuration for plain-text table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Print a header row
    pub header: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { header: true }
    }
}

/// Render a ranking as an aligned plain-text table.
///
/// Columns are rank, count and word. The word comes last so that wide
/// characters don't break the alignment of the numeric columns.
pub fn convert_to_table(list: &RankedList, config: &TableConfig) -> String {
    if list.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let rank_width = list.len().to_string().len().max("Rank".len());
    let count_width = list.max_count().to_string().len().max("Count".len());

    let mut output = String::new();

    if config.header {
        output.push_str(&format!(
            "{:>rank_width$}  {:>count_width$}  {}\n",
            "Rank", "Count", "Word"
        ));
    }

    for (index, entry) in list.iter().enumerate() {
        output.push_str(&format!(
            "{:>rank_width$}  {:>count_width$}  {}\n",
            index + 1,
            entry.count,
            entry.token
        ));
    }

    output
}
