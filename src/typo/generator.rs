// src/typo/generator.rs
// =============================================================================
// Generates single-edit misspellings of a domain name.
//
// Three families of typos, unioned into one set:
// - duplication: "abc" -> "aabc", "abbc", "abcc" ('.' and '/' are never doubled)
// - removal:     "abc" -> "bc", "ac", "ab"
// - swap:        "abcd" -> "acbd", "abdc" (the first character stays put)
//
// Everything works on chars (Unicode code points), not bytes, so
// internationalized names are mutated one character at a time.
// =============================================================================

use std::collections::HashSet;

// Characters that are never duplicated
const NO_DUPLICATE: [char; 2] = ['.', '/'];

pub fn duplications(input: &str) -> HashSet<String> {
    let chars: Vec<char> = input.chars().collect();

    (0..chars.len())
        .filter(|&i| !NO_DUPLICATE.contains(&chars[i]))
        .map(|i| {
            let mut typo = chars.clone();
            typo.insert(i, chars[i]);
            typo.into_iter().collect()
        })
        .collect()
}

pub fn removals(input: &str) -> HashSet<String> {
    let chars: Vec<char> = input.chars().collect();

    (0..chars.len())
        .map(|i| {
            let mut typo = chars.clone();
            typo.remove(i);
            typo.into_iter().collect()
        })
        .collect()
}

// Swaps each pair (i, i + 1) for i in 1..=len-2; swaps that change nothing
// (e.g. the "oo" in "google") are dropped
pub fn swaps(input: &str) -> HashSet<String> {
    let chars: Vec<char> = input.chars().collect();

    (1..chars.len().saturating_sub(1))
        .filter(|&i| chars[i] != chars[i + 1])
        .map(|i| {
            let mut typo = chars.clone();
            typo.swap(i, i + 1);
            typo.into_iter().collect()
        })
        .collect()
}

/// All single-edit typos of `input`.
pub fn generate_typos(input: &str) -> HashSet<String> {
    let mut typos = duplications(input);
    typos.extend(removals(input));
    typos.extend(swaps(input));
    typos
}
