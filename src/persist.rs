//! Persistence module - snapshot files and the local leaderboard.
//!
//! Both stores are plain JSON files. Snapshot files hold one `GameSnapshot`;
//! the leaderboard holds the top scores sorted best-first.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{GameSnapshot, ScoreRecord};

/// Most scores kept on the leaderboard.
pub const LEADERBOARD_CAP: usize = 10;

/// Write a snapshot as pretty JSON.
pub fn save_snapshot(path: &Path, snapshot: &GameSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
    fs::write(path, json).with_context(|| format!("writing snapshot to {}", path.display()))?;
    log::info!("snapshot saved to {}", path.display());
    Ok(())
}

/// Read a snapshot file. The structural validity of its contents is the
/// restore path's concern, not this loader's.
pub fn load_snapshot(path: &Path) -> Result<GameSnapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot from {}", path.display()))?;
    serde_json::from_str(&json).context("parsing snapshot")
}

/// Read the leaderboard; a missing file is an empty board.
pub fn load_scores(path: &Path) -> Result<Vec<ScoreRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading scores from {}", path.display()))?;
    serde_json::from_str(&json).context("parsing scores")
}

/// Insert a result, keeping the board sorted best-first and capped.
pub fn append_score(path: &Path, record: ScoreRecord) -> Result<()> {
    let mut scores = load_scores(path)?;
    scores.push(record);
    scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp_ms.cmp(&b.timestamp_ms)));
    scores.truncate(LEADERBOARD_CAP);
    let json = serde_json::to_string_pretty(&scores).context("serializing scores")?;
    fs::write(path, json).with_context(|| format!("writing scores to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Session;
    use crate::types::Difficulty;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockfall-{}-{}.json", std::process::id(), name))
    }

    fn record(player: &str, score: u32, timestamp_ms: u64) -> ScoreRecord {
        ScoreRecord {
            player: player.to_string(),
            score,
            difficulty: Difficulty::Medium,
            timestamp_ms,
        }
    }

    #[test]
    fn test_snapshot_file_roundtrip() {
        let path = temp_path("snap");
        let snap = Session::new("dave", Difficulty::Hard, 11).export();
        save_snapshot(&path, &snap).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, snap);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_leaderboard_is_empty() {
        let path = temp_path("missing");
        fs::remove_file(&path).ok();
        assert!(load_scores(&path).unwrap().is_empty());
    }

    #[test]
    fn test_scores_sorted_and_capped() {
        let path = temp_path("scores");
        fs::remove_file(&path).ok();
        for i in 0..12u32 {
            append_score(&path, record("p", i * 100, u64::from(i))).unwrap();
        }
        let scores = load_scores(&path).unwrap();
        assert_eq!(scores.len(), LEADERBOARD_CAP);
        assert_eq!(scores[0].score, 1100);
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_ties_keep_earlier_result_first() {
        let path = temp_path("ties");
        fs::remove_file(&path).ok();
        append_score(&path, record("late", 500, 2000)).unwrap();
        append_score(&path, record("early", 500, 1000)).unwrap();
        let scores = load_scores(&path).unwrap();
        assert_eq!(scores[0].player, "early");
        fs::remove_file(&path).ok();
    }
}
