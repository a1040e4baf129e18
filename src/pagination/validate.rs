//! Paging descriptor validation

use super::types::Paging;
use crate::error::{Error, Result};

/// Check a descriptor's internal consistency before anything is fetched.
///
/// `None` is valid and means "use all defaults". Trim counts may not exceed
/// the page size; this also applies when the page size is left at 0.
pub fn validate(paging: Option<&Paging>) -> Result<()> {
    let Some(paging) = paging else {
        return Ok(());
    };

    if paging.ignore_last_n > 0 && paging.ignore_last_n > paging.page_size {
        return Err(Error::invalid_argument(format!(
            "ignore_last_n ({}) cannot exceed page_size ({})",
            paging.ignore_last_n, paging.page_size
        )));
    }

    if paging.ignore_first_n > 0 && paging.ignore_first_n > paging.page_size {
        return Err(Error::invalid_argument(format!(
            "ignore_first_n ({}) cannot exceed page_size ({})",
            paging.ignore_first_n, paging.page_size
        )));
    }

    Ok(())
}
