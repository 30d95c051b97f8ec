use crate::formatters::EMPTY_MESSAGE;
use crate::rank::RankedList;

/// Render a ranking as a Markdown table.
///
/// An empty ranking renders as an italic notice instead of a table with no
/// rows.
pub fn convert_to_markdown(list: &RankedList) -> String {
    if list.is_empty() {
        return format!("_{}_\n", EMPTY_MESSAGE);
    }

    let mut output = String::from("| Rank | Word | Count |\n|---:|:---|---:|\n");
    for (index, entry) in list.iter().enumerate() {
        output.push_str(&format!("| {} | {} | {} |\n", index + 1, escape_cell(&entry.token), entry.count));
    }

    output
}

fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\").replace('|', "\\|")
}
