use std::cmp::Ordering;

use crate::platforms::PlatformSetting;

/// Enabled platforms first, then ascending id.
pub fn compare_platforms(a: &PlatformSetting, b: &PlatformSetting) -> Ordering {
    b.enabled.cmp(&a.enabled).then_with(|| a.id.cmp(&b.id))
}

pub fn sort_platforms(platforms: &mut [PlatformSetting]) {
    platforms.sort_by(compare_platforms);
}

/// Sorted copy, leaving the cached list untouched.
pub fn sorted(platforms: &[PlatformSetting]) -> Vec<PlatformSetting> {
    let mut copy = platforms.to_vec();
    sort_platforms(&mut copy);
    copy
}
