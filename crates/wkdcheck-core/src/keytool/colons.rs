//! Parsing of the key tool's colon-delimited records.
//!
//! `gpg --with-colons` prints one record per line, fields separated by `:`.
//! Field 1 is the record type; field 10 carries the fingerprint for `fpr`
//! records and the user ID for `uid` records. We only need enough of the
//! format to confirm a public key is present and summarize it.

use super::KeyInfo;

/// Extracts a key summary from colon-delimited tool output.
///
/// Returns `None` when the output contains no `pub` record, i.e. the tool ran
/// but did not see a public key. The primary fingerprint is taken from the
/// first `fpr` record following the first `pub`; subkey fingerprints are
/// ignored.
pub(crate) fn parse_colon_records(output: &str) -> Option<KeyInfo> {
    let mut saw_pub = false;
    let mut pending_primary_fpr = false;
    let mut fingerprint = None;
    let mut user_ids = Vec::new();

    for line in output.lines() {
        let mut fields = line.split(':');
        match fields.next().unwrap_or("") {
            "pub" => {
                saw_pub = true;
                pending_primary_fpr = fingerprint.is_none();
            }
            "fpr" if pending_primary_fpr => {
                fingerprint = fields.nth(8).filter(|f| !f.is_empty()).map(str::to_string);
                pending_primary_fpr = false;
            }
            "sub" | "ssb" => pending_primary_fpr = false,
            "uid" => {
                if let Some(uid) = fields.nth(8).filter(|f| !f.is_empty()) {
                    user_ids.push(uid.to_string());
                }
            }
            _ => {}
        }
    }

    if !saw_pub {
        return None;
    }
    Some(KeyInfo {
        fingerprint,
        user_ids,
    })
}
