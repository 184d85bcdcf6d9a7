pub mod analysis;
pub mod drafts;
