use crate::config::toml_config::TeamMode;
use crate::core::{Assignment, Respondent};

/// 人數對應組數：0–5 → 2, 6–11 → 3, 12–16 → 4, 17–21 → 5, 22 以上 → 6
pub fn team_count_for(n: usize) -> u32 {
    match n {
        0..=5 => 2,
        6..=11 => 3,
        12..=16 => 4,
        17..=21 => 5,
        _ => 6,
    }
}

/// 依洗牌後的順序分組
pub fn partition(respondents: Vec<Respondent>, mode: TeamMode, team_size: usize) -> Assignment {
    let n = respondents.len();

    match mode {
        TeamMode::FixedSize => {
            let size = team_size.max(1);
            let entries: Vec<(u32, Respondent)> = respondents
                .into_iter()
                .enumerate()
                .map(|(j, r)| ((j / size) as u32 + 1, r))
                .collect();
            Assignment {
                team_count: n.div_ceil(size) as u32,
                entries,
            }
        }
        TeamMode::FixedCount => {
            let tc = team_count_for(n);
            let entries = respondents
                .into_iter()
                .enumerate()
                .map(|(k, r)| ((k as u32 % tc) + 1, r))
                .collect();
            Assignment {
                team_count: tc,
                entries,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(n: usize) -> Vec<Respondent> {
        (0..n)
            .map(|i| Respondent {
                name: format!("P{}", i),
                email: None,
                source_row: i + 2,
            })
            .collect()
    }

    fn sizes(assignment: &Assignment) -> Vec<usize> {
        assignment.groups("Group ").iter().map(|g| g.len()).collect()
    }

    #[test]
    fn test_team_count_boundaries() {
        let cases = [
            (0, 2),
            (5, 2),
            (6, 3),
            (11, 3),
            (12, 4),
            (16, 4),
            (17, 5),
            (21, 5),
            (22, 6),
            (26, 6),
            (27, 6),
            (300, 6),
        ];
        for (n, expected) in cases {
            assert_eq!(team_count_for(n), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_round_robin_is_balanced() {
        for n in 0..=60 {
            let assignment = partition(people(n), TeamMode::FixedCount, 4);
            let sizes = sizes(&assignment);

            assert_eq!(sizes.len() as u32, team_count_for(n));
            assert_eq!(sizes.iter().sum::<usize>(), n);
            let max = sizes.iter().max().copied().unwrap_or(0);
            let min = sizes.iter().min().copied().unwrap_or(0);
            assert!(max - min <= 1, "n = {} sizes = {:?}", n, sizes);
        }
    }

    #[test]
    fn test_fixed_size_groups() {
        for size in 1..=6 {
            for n in 0..=40 {
                let assignment = partition(people(n), TeamMode::FixedSize, size);
                let sizes = sizes(&assignment);

                assert_eq!(sizes.len(), n.div_ceil(size));
                if let Some((last, full)) = sizes.split_last() {
                    assert!(full.iter().all(|&s| s == size));
                    assert!(*last >= 1 && *last <= size);
                }
            }
        }
    }

    #[test]
    fn test_examples() {
        let ten = partition(people(10), TeamMode::FixedCount, 4);
        assert_eq!(ten.team_count, 3);
        assert_eq!(sizes(&ten), vec![4, 3, 3]);

        let thirty = partition(people(30), TeamMode::FixedCount, 4);
        assert_eq!(sizes(&thirty), vec![5; 6]);

        let nine = partition(people(9), TeamMode::FixedSize, 4);
        assert_eq!(sizes(&nine), vec![4, 4, 1]);
    }

    #[test]
    fn test_small_input_leaves_empty_groups() {
        let one = partition(people(1), TeamMode::FixedCount, 4);
        assert_eq!(one.team_count, 2);
        assert_eq!(sizes(&one), vec![1, 0]);
    }

    #[test]
    fn test_every_respondent_assigned_once() {
        let assignment = partition(people(23), TeamMode::FixedCount, 4);
        let mut rows: Vec<usize> = assignment.entries.iter().map(|(_, r)| r.source_row).collect();
        rows.sort_unstable();
        assert_eq!(rows, (2..25).collect::<Vec<_>>());
        assert!(assignment
            .entries
            .iter()
            .all(|(g, _)| *g >= 1 && *g <= assignment.team_count));
    }
}
