//! Shared type definitions for the lake ecosystem simulation.
//!
//! This crate is the single source of truth for the values that cross crate
//! boundaries: the [`Vec2`] vector utility, identifiers, seasons, and the
//! read-only records handed to renderers, loggers, and summarizers. Record
//! types flow downstream to `TypeScript` via `ts-rs` for browser renderers.
//!
//! # Modules
//!
//! - [`vector`] -- 2D vector math (add, scale, normalize, length, distance)
//! - [`ids`] -- Type-safe counter wrappers for entity identifiers
//! - [`enums`] -- Seasons and the day/night phase
//! - [`structs`] -- Snapshots, stats, time-series points, season tallies

pub mod enums;
pub mod ids;
pub mod structs;
pub mod vector;

// Re-export all public types at crate root for convenience.
pub use enums::{DayPhase, Season};
pub use ids::FishId;
pub use structs::{
    CatchMarker, FishView, LakeSnapshot, LakeStats, PlantView, Rect, SeasonCounters, SeasonTally,
    TimeSeriesPoint,
};
pub use vector::Vec2;

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the snapshot contract.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to the
        // crate root.
        use ts_rs::TS;

        let _ = crate::vector::Vec2::export_all();
        let _ = crate::ids::FishId::export_all();

        let _ = crate::enums::Season::export_all();
        let _ = crate::enums::DayPhase::export_all();

        let _ = crate::structs::FishView::export_all();
        let _ = crate::structs::PlantView::export_all();
        let _ = crate::structs::CatchMarker::export_all();
        let _ = crate::structs::Rect::export_all();
        let _ = crate::structs::LakeStats::export_all();
        let _ = crate::structs::LakeSnapshot::export_all();
        let _ = crate::structs::TimeSeriesPoint::export_all();
        let _ = crate::structs::SeasonTally::export_all();
        let _ = crate::structs::SeasonCounters::export_all();
    }
}
