pub mod category;
pub mod ledger;
pub mod month;
pub mod trip;

pub use category::TripCategory;
pub use ledger::MonthLedger;
pub use month::MonthId;
pub use trip::{PlannedTrip, TripCandidate, TripRecord, reimbursement_for, round2};
