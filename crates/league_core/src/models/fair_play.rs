use serde::{Deserialize, Serialize};

use super::ids::{PlayerId, RecordId, TeamId};

/// Lifecycle of a disciplinary record.
///
/// Only `Active` records contribute points to standings fair-play totals;
/// a record under appeal, overturned, or sitting in the reduced state is
/// excluded until it is reinstated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairPlayStatus {
    Active,
    Appealed,
    Overturned,
    Reduced,
}

/// Who a disciplinary record is raised against.
///
/// Records can target non-roster subjects (team officials, staff), which is
/// why a free-text variant exists alongside the player reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairPlaySubject {
    Player(PlayerId),
    Named(String),
}

/// A disciplinary entry independent of match events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairPlayRecord {
    pub id: RecordId,
    pub team: TeamId,
    pub subject: FairPlaySubject,
    pub points: u32,
    /// Preserved when the record is reduced on appeal, so a reinstatement
    /// can restore the original sanction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_points: Option<u32>,
    pub status: FairPlayStatus,
}

impl FairPlayRecord {
    pub fn new(team: TeamId, subject: FairPlaySubject, points: u32) -> Self {
        Self {
            id: RecordId::new(),
            team,
            subject,
            points,
            original_points: None,
            status: FairPlayStatus::Active,
        }
    }

    /// Points this record currently contributes to standings.
    pub fn counted_points(&self) -> u32 {
        match self.status {
            FairPlayStatus::Active => self.points,
            FairPlayStatus::Appealed | FairPlayStatus::Overturned | FairPlayStatus::Reduced => 0,
        }
    }

    /// Reduce the sanction on appeal, keeping the original points on record.
    /// The record stays out of standings totals until reinstated.
    pub fn reduce(&mut self, new_points: u32) {
        if self.original_points.is_none() {
            self.original_points = Some(self.points);
        }
        self.points = new_points;
        self.status = FairPlayStatus::Reduced;
    }

    pub fn overturn(&mut self) {
        self.status = FairPlayStatus::Overturned;
    }

    /// Return the record to standings totals at its current points value.
    /// Used both when an appeal fails and when a reduction is confirmed;
    /// `original_points` stays on record either way.
    pub fn reinstate(&mut self) {
        self.status = FairPlayStatus::Active;
    }
}
