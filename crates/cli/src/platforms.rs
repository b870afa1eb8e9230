use symwiz_android::AndroidProject;
use symwiz_core::{Platform, PlatformProject};
use symwiz_ios::IosProject;

// platform table

#[must_use]
pub fn get_platforms() -> [Box<dyn PlatformProject>; 2] {
    [Box::new(IosProject), Box::new(AndroidProject)]
}
