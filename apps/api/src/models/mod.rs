pub mod resume;

pub use resume::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord, Skills};
