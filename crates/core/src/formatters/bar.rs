use crate::formatters::EMPTY_MESSAGE;
use crate::rank::RankedList;

/// Configuration for bar chart output
#[derive(Debug, Clone)]
pub struct BarConfig {
    /// Length in characters of the bar for the highest count
    pub width: usize,
    /// Character bars are drawn with
    pub fill: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self { width: 40, fill: '█' }
    }
}

/// Render a ranking as a horizontal bar chart.
///
/// Bars are scaled so the highest count spans `width` characters. Any
/// nonzero count gets at least one character.
pub fn convert_to_bar_chart(list: &RankedList, config: &BarConfig) -> String {
    if list.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let max = list.max_count();
    let count_width = max.to_string().len();

    let mut output = String::new();
    for entry in list {
        let bar: String = std::iter::repeat_n(config.fill, bar_length(entry.count, max, config.width)).collect();
        output.push_str(&format!("{:>count_width$} {} {}\n", entry.count, bar, entry.token));
    }

    output
}

fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (count * width).div_ceil(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StopWordSet, rank};

    #[test]
    fn test_bar_lengths_scale_to_width() {
        assert_eq!(bar_length(10, 10, 40), 40);
        assert_eq!(bar_length(5, 10, 40), 20);
        assert_eq!(bar_length(1, 100, 40), 1);
        assert_eq!(bar_length(3, 3, 0), 0);
    }

    #[test]
    fn test_bar_chart_lines() {
        let tokens: Vec<String> = ["数据", "数据", "图表"].iter().map(|s| s.to_string()).collect();
        let list = rank(&tokens, &StopWordSet::empty(), 20);
        let config = BarConfig { width: 4, fill: '#' };

        let output = convert_to_bar_chart(&list, &config);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines, vec!["2 #### 数据", "1 ## 图表"]);
    }

    #[test]
    fn test_bar_chart_empty() {
        let output = convert_to_bar_chart(&RankedList::default(), &BarConfig::default());
        assert_eq!(output.trim(), EMPTY_MESSAGE);
    }
}
