// ABOUTME: The report collaborator: parses the analysis reply lines and renders a numbered terminal table.
// ABOUTME: Classifies risk-rating values into severity buckets by last-match-wins keyword containment.

use owo_colors::OwoColorize;

/// Label substring marking the risk-rating item.
const RISK_LABEL_TERM: &str = "위험도";

const LOW_KEYWORDS: &[&str] = &["낮음", "low"];
const MID_KEYWORDS: &[&str] = &["보통", "중간", "medium"];
const HIGH_KEYWORDS: &[&str] = &["높음", "high"];

/// One parsed `"항목명: 내용"` line of the analysis reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    pub label: String,
    pub value: String,
}

/// Severity bucket for the risk-rating value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Mid,
    High,
}

/// Split the reply into items: one per line, split on the FIRST colon;
/// lines without a colon are skipped.
pub fn parse_items(reply: &str) -> Vec<ReportItem> {
    reply
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (label, value) = line.split_once(':')?;
            Some(ReportItem {
                label: label.trim().to_string(),
                value: value.trim().to_string(),
            })
        })
        .collect()
}

/// Classify a risk-rating value by keyword containment.
///
/// Checks run in fixed order — low, mid, high — and each later hit
/// overwrites the bucket, so a high keyword anywhere in the value always
/// wins, and mid beats low only when no high keyword is present. Values
/// with no keyword at all stay Mid.
pub fn classify(value: &str) -> Severity {
    let mut bucket = Severity::Mid;
    if LOW_KEYWORDS.iter().any(|k| value.contains(k)) {
        bucket = Severity::Low;
    }
    if MID_KEYWORDS.iter().any(|k| value.contains(k)) {
        bucket = Severity::Mid;
    }
    if HIGH_KEYWORDS.iter().any(|k| value.contains(k)) {
        bucket = Severity::High;
    }
    bucket
}

/// True for items whose value should be stylized as a severity badge.
pub fn is_risk_item(item: &ReportItem) -> bool {
    item.label.contains(RISK_LABEL_TERM)
}

fn badge(value: &str, severity: Severity, color: bool) -> String {
    let text = format!("[{}]", value);
    if !color {
        return text;
    }
    match severity {
        Severity::Low => text.green().bold().to_string(),
        Severity::Mid => text.yellow().bold().to_string(),
        Severity::High => text.red().bold().to_string(),
    }
}

/// Render the parsed items as a numbered table, rows counted from 1, with
/// the risk-rating value shown as a colored badge.
pub fn render(items: &[ReportItem], color: bool) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(if color {
        format!(" #  {}", "분석 결과".bold())
    } else {
        " #  분석 결과".to_string()
    });
    for (idx, item) in items.iter().enumerate() {
        let value = if is_risk_item(item) {
            badge(&item.value, classify(&item.value), color)
        } else {
            item.value.clone()
        };
        lines.push(format!("{:>2}. {}: {}", idx + 1, item.label, value));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_label_value_lines_on_first_colon() {
        let reply = "프레이밍 방식: 사건 중심\n\
                     키 없는 줄\n\
                     출처 신뢰도: 높음: 공식 발표 인용\n";
        let items = parse_items(reply);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "프레이밍 방식");
        assert_eq!(items[0].value, "사건 중심");
        // Split happens on the first colon only.
        assert_eq!(items[1].value, "높음: 공식 발표 인용");
    }

    #[test]
    fn classify_mid_keywords() {
        assert_eq!(classify("보통(중간 수준, 근거 있음)"), Severity::Mid);
        assert_eq!(classify("medium"), Severity::Mid);
    }

    #[test]
    fn classify_high_overrides_mid_and_low() {
        // The same value with a high keyword added anywhere reclassifies.
        assert_eq!(
            classify("보통(중간 수준, 근거 있음) — 다만 선동성은 높음"),
            Severity::High
        );
        assert_eq!(classify("낮음에서 높음 사이"), Severity::High);
    }

    #[test]
    fn classify_mid_overrides_low_without_high() {
        assert_eq!(classify("낮음~보통"), Severity::Mid);
    }

    #[test]
    fn classify_low_only() {
        assert_eq!(classify("낮음"), Severity::Low);
        assert_eq!(classify("low risk"), Severity::Low);
    }

    #[test]
    fn classify_defaults_to_mid() {
        assert_eq!(classify("판단 불가"), Severity::Mid);
    }

    #[test]
    fn risk_item_detection() {
        assert!(is_risk_item(&ReportItem {
            label: "6. 종합 위험도 평가".to_string(),
            value: "보통".to_string(),
        }));
        assert!(!is_risk_item(&ReportItem {
            label: "출처와 근거의 신뢰도".to_string(),
            value: "높음".to_string(),
        }));
    }

    #[test]
    fn render_numbers_rows_from_one() {
        let items = parse_items("가: 1\n나: 2\n종합 위험도: 높음");
        let table = render(&items, false);
        assert!(table.contains(" 1. 가: 1"));
        assert!(table.contains(" 2. 나: 2"));
        assert!(table.contains(" 3. 종합 위험도: [높음]"));
    }

    #[test]
    fn render_without_color_has_no_escapes() {
        let items = parse_items("종합 위험도: 높음");
        let table = render(&items, false);
        assert!(!table.contains('\u{1b}'));
    }

    #[test]
    fn render_with_color_badges_risk_value() {
        let items = parse_items("종합 위험도: 높음");
        let table = render(&items, true);
        assert!(table.contains('\u{1b}'), "expected ANSI styling");
        assert!(table.contains("[높음]"));
    }
}
