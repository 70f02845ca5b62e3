use crate::core::columns::DetectedColumns;
use crate::core::{Respondent, ResponseTable};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// 把資料列轉成填答者；缺少的儲存格視為空字串
pub fn respondents_from(table: &ResponseTable, columns: DetectedColumns) -> Vec<Respondent> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| Respondent {
            name: row.get(columns.name).cloned().unwrap_or_default(),
            email: columns
                .email
                .and_then(|idx| row.get(idx))
                .filter(|email| !email.trim().is_empty())
                .cloned(),
            source_row: i + 2,
        })
        .collect()
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 同一個 Email 只保留第一次出現的填答；沒有 Email 的不合併
pub fn dedupe_by_email(respondents: Vec<Respondent>) -> Vec<Respondent> {
    let mut seen = HashSet::new();
    let before = respondents.len();

    let kept: Vec<Respondent> = respondents
        .into_iter()
        .filter(|r| match &r.email {
            Some(email) => seen.insert(normalize_email(email)),
            None => true,
        })
        .collect();

    if kept.len() < before {
        tracing::info!("🧹 Removed {} duplicate responses by email", before - kept.len());
    }

    kept
}

/// Fisher–Yates 洗牌
pub fn shuffle<R: Rng + ?Sized>(mut respondents: Vec<Respondent>, rng: &mut R) -> Vec<Respondent> {
    respondents.shuffle(rng);
    respondents
}

pub fn dedupe_and_shuffle<R: Rng + ?Sized>(
    respondents: Vec<Respondent>,
    dedupe: bool,
    has_email_column: bool,
    rng: &mut R,
) -> Vec<Respondent> {
    let data = if dedupe && has_email_column {
        dedupe_by_email(respondents)
    } else {
        respondents
    };
    shuffle(data, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn respondent(name: &str, email: Option<&str>, row: usize) -> Respondent {
        Respondent {
            name: name.to_string(),
            email: email.map(str::to_string),
            source_row: row,
        }
    }

    #[test]
    fn test_respondents_from_table() {
        let table = ResponseTable::new(
            "Form Responses 1",
            vec!["Email".into(), "Name".into()],
            vec![
                vec!["a@x.io".into(), "Ann".into()],
                vec!["  ".into(), "Bo".into()],
                vec!["c@x.io".into()],
            ],
        );
        let columns = DetectedColumns {
            name: 1,
            email: Some(0),
        };

        let respondents = respondents_from(&table, columns);
        assert_eq!(respondents.len(), 3);
        assert_eq!(respondents[0], respondent("Ann", Some("a@x.io"), 2));
        assert_eq!(respondents[1].email, None);
        assert_eq!(respondents[2].name, "");
        assert_eq!(respondents[2].source_row, 4);
    }

    #[test]
    fn test_dedupe_keeps_first_normalized_email() {
        let input = vec![
            respondent("Ann", Some("Ann@Example.com"), 2),
            respondent("Ann again", Some("  ann@example.com "), 3),
            respondent("Bo", None, 4),
            respondent("Cy", None, 5),
        ];

        let kept = dedupe_by_email(input);
        let names: Vec<&str> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bo", "Cy"]);
    }

    #[test]
    fn test_dedupe_disabled_keeps_everything() {
        let input = vec![
            respondent("Ann", Some("a@x.io"), 2),
            respondent("Ann", Some("a@x.io"), 3),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(dedupe_and_shuffle(input.clone(), false, true, &mut rng).len(), 2);
        assert_eq!(dedupe_and_shuffle(input.clone(), true, false, &mut rng).len(), 2);
        assert_eq!(dedupe_and_shuffle(input, true, true, &mut rng).len(), 1);
    }

    #[test]
    fn test_shuffle_is_a_permutation_and_seedable() {
        let input: Vec<Respondent> = (0..20)
            .map(|i| respondent(&format!("P{}", i), None, i + 2))
            .collect();

        let a = shuffle(input.clone(), &mut StdRng::seed_from_u64(42));
        let b = shuffle(input.clone(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_by_key(|r| r.source_row);
        assert_eq!(sorted, input);
    }
}
