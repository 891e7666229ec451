use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static READS: AtomicUsize = AtomicUsize::new(0);

fn counting_source() -> Option<String> {
    READS.fetch_add(1, Ordering::SeqCst);
    Some("abc123".to_owned())
}

#[test]
fn lazy_token_is_read_once_and_cached() {
    let auth = AuthContext::lazy(counting_source);
    assert_eq!(READS.load(Ordering::SeqCst), 0);
    assert_eq!(auth.token(), "abc123");
    assert_eq!(auth.token(), "abc123");
    let cloned = auth.clone();
    assert_eq!(cloned.token(), "abc123");
    assert_eq!(READS.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_token_reads_as_empty() {
    let auth = AuthContext::lazy(|| None);
    assert_eq!(auth.token(), "");
}

#[test]
fn apply_header_injects_token() {
    let auth = AuthContext::with_token("abc123");
    let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
    auth.apply_header(&mut headers);
    assert!(headers.contains(&(CSRF_HEADER.to_owned(), "abc123".to_owned())));
    assert_eq!(headers.len(), 2);
}

#[test]
fn apply_header_skips_when_token_missing() {
    let auth = AuthContext::lazy(|| None);
    let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
    auth.apply_header(&mut headers);
    assert_eq!(headers.len(), 1);
}

#[test]
fn apply_form_appends_field() {
    let auth = AuthContext::with_token("abc123");
    let mut fields = vec![("name".to_owned(), "Default".to_owned())];
    auth.apply_form(&mut fields);
    assert_eq!(fields.last(), Some(&(CSRF_FIELD.to_owned(), "abc123".to_owned())));
}

#[test]
fn apply_form_keeps_existing_token() {
    let auth = AuthContext::with_token("abc123");
    let mut fields = vec![(CSRF_FIELD.to_owned(), "existing".to_owned())];
    auth.apply_form(&mut fields);
    assert_eq!(fields, vec![(CSRF_FIELD.to_owned(), "existing".to_owned())]);
}
