//! Remote font retrieval.

use std::io::Read;

use crate::errors::FetchError;

/// Downloads the font at `url` into memory. Any failure is fatal to the run;
/// there are no retries.
pub(crate) fn fetch_font(url: &str) -> Result<Vec<u8>, FetchError> {
    let response = ureq::get(url).call()?;
    let mut bytes = vec![];
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(FetchError::Io)?;
    log::debug!("fetched {} bytes from {url}", bytes.len());
    Ok(bytes)
}
