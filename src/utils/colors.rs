/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Color used for a trip category in tables.
pub fn color_for_category(category: crate::models::TripCategory) -> &'static str {
    use crate::models::TripCategory::*;
    match category {
        Commute => BLUE,
        ClientVisit => GREEN,
        MeetingTransport => CYAN,
        BusinessTravel => MAGENTA,
        Inspection => YELLOW,
        VehicleService => RED,
    }
}
