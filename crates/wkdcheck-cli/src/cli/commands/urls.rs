//! `--url-only`: print derived lookup URLs, no network, no key tool.

use anyhow::{bail, Result};
use wkdcheck_core::lookup_url::derive_lookup_url;

/// Prints one URL per address to stdout, in input order.
pub fn run_urls(emails: &[String], keep_going: bool) -> Result<()> {
    let mut failures = 0usize;
    for email in emails {
        match derive_lookup_url(email) {
            Ok(url) => println!("{}", url),
            Err(e) => {
                if !keep_going {
                    return Err(e.into());
                }
                tracing::warn!("{}", e);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} of {} addresses were malformed", failures, emails.len());
    }
    Ok(())
}
