// Host-side tests for the Easter-egg key sequence matcher.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod konami {
    include!("../src/konami.rs");
}

use constants::KONAMI_SEQUENCE;
use konami::SequenceMatcher;

fn feed(matcher: &mut SequenceMatcher, keys: &[&str]) -> usize {
    keys.iter().filter(|k| matcher.push(k)).count()
}

#[test]
fn full_sequence_completes_once() {
    let mut m = SequenceMatcher::new(&KONAMI_SEQUENCE);
    let hits = feed(&mut m, &KONAMI_SEQUENCE);
    assert_eq!(hits, 1);
    assert_eq!(m.progress(), 0);
}

#[test]
fn letters_match_case_insensitively() {
    let mut m = SequenceMatcher::new(&KONAMI_SEQUENCE);
    let mut keys = KONAMI_SEQUENCE.to_vec();
    keys[8] = "B";
    keys[9] = "A";
    assert_eq!(feed(&mut m, &keys), 1);
}

#[test]
fn wrong_key_resets_progress() {
    let mut m = SequenceMatcher::new(&KONAMI_SEQUENCE);
    feed(&mut m, &["ArrowUp", "ArrowUp", "ArrowDown"]);
    assert_eq!(m.progress(), 3);
    m.push("x");
    assert_eq!(m.progress(), 0);
}

#[test]
fn extra_leading_key_still_completes() {
    // a third "up" falls back to two matched ups instead of starting over
    let mut m = SequenceMatcher::new(&KONAMI_SEQUENCE);
    let mut keys = vec!["ArrowUp"];
    keys.extend_from_slice(&KONAMI_SEQUENCE);
    assert_eq!(feed(&mut m, &keys), 1);
}

#[test]
fn repeated_sequence_toggles_twice() {
    let mut m = SequenceMatcher::new(&KONAMI_SEQUENCE);
    let mut keys = KONAMI_SEQUENCE.to_vec();
    keys.extend_from_slice(&KONAMI_SEQUENCE);
    assert_eq!(feed(&mut m, &keys), 2);
}

#[test]
fn reset_clears_progress() {
    let mut m = SequenceMatcher::new(&["a", "b"]);
    m.push("a");
    assert_eq!(m.progress(), 1);
    m.reset();
    assert!(!m.push("b"));
}

#[test]
fn empty_sequence_never_matches() {
    let mut m = SequenceMatcher::new::<&str>(&[]);
    assert!(!m.push("a"));
}
