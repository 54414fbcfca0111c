//! Email address composition.

use rand::Rng;
use reference_pool::{uniform_int, weighted_int};

/// Build an email address from a person's names and a top-level domain.
///
/// The local part is one of `given.surname`, `givensurname`, `g.surname` or
/// `given_surname##`, picked uniformly. The domain is `{surname}.{tld}`,
/// `mail.{tld}` or `{given}{surname}.{tld}`, weighted toward the first.
pub fn compose_email<R: Rng>(rng: &mut R, given_name: &str, surname: &str, tld: &str) -> String {
    let given = slug(given_name, "user");
    let surname = slug(surname, "mail");
    let tld = tld.trim().trim_start_matches('.').to_ascii_lowercase();

    let local = match uniform_int(rng, 0, 3) {
        0 => format!("{given}.{surname}"),
        1 => format!("{given}{surname}"),
        2 => format!("{}.{surname}", &given[..1]),
        _ => format!("{given}_{surname}{:02}", uniform_int(rng, 0, 99)),
    };

    let domain = match weighted_int(rng, 1, 3) {
        1 => format!("{surname}.{tld}"),
        2 => format!("mail.{tld}"),
        _ => format!("{given}{surname}.{tld}"),
    };

    format!("{local}@{domain}")
}

/// Lower-case ASCII alphanumerics of `value`, or `fallback` if none remain.
fn slug(value: &str, fallback: &str) -> String {
    let slug: String = value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}
