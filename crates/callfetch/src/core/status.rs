/// Returns `true` if the HTTP status code indicates success.
///
/// This is the range a fetch-style `ok` flag covers: `200..=299`.
///
/// # Examples
///
/// ```
/// use callfetch::core::is_success;
///
/// assert!(is_success(200));
/// assert!(is_success(204));
/// assert!(!is_success(304));
/// assert!(!is_success(404));
/// ```
pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}
