mod android_project;

pub use android_project::AndroidProject;
