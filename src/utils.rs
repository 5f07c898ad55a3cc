use anyhow::{Result, bail};
use std::{fmt::Debug, ops::RangeBounds};

/// Check that a number lies within an expected range.
pub fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {:?}, but is {:?}", range, num);
    }

    Ok(())
}
