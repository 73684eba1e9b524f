use rand::Rng;
use rand::seq::index;
use serde::Deserialize;

/// Characters a generated password is drawn from.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQSTUVWXYZabcdefghijklmnpqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Shape of the initial passwords handed to judges and tabulators.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Shortest generated password. Default: 8.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Longest generated password. Default: 10.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Minimum number of digits. Default: 4.
    #[serde(default = "default_min_digits")]
    pub min_digits: usize,
}

fn default_min_length() -> usize {
    8
}
fn default_max_length() -> usize {
    10
}
fn default_min_digits() -> usize {
    4
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            min_digits: default_min_digits(),
        }
    }
}

impl PasswordPolicy {
    /// Length bounds with `max_length` never below `min_length`, and enough
    /// room for the required digits.
    fn bounds(&self) -> (usize, usize) {
        let min = self.min_length.max(self.min_digits).max(1);
        (min, self.max_length.max(min))
    }
}

/// Check a password against the policy.
///
/// Accepted passwords are ASCII alphanumeric, within the length bounds,
/// carry at least `min_digits` digits and are not made of uppercase
/// letters only.
pub fn is_acceptable(password: &str, policy: &PasswordPolicy) -> bool {
    let (min, max) = policy.bounds();
    let len = password.chars().count();
    if len < min || len > max {
        return false;
    }
    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    if password.chars().all(|c| c.is_ascii_uppercase()) {
        return false;
    }
    password.chars().filter(char::is_ascii_digit).count() >= policy.min_digits
}

/// Generate a password with the thread-local RNG.
pub fn generate_password(policy: &PasswordPolicy) -> String {
    generate_password_with(&mut rand::rng(), policy)
}

/// Generate a password from `rng`.
///
/// `min_digits` random positions are filled with digits up front, so any
/// policy is satisfied in a bounded number of draws. Only a password of
/// uppercase letters alone, possible when `min_digits` is 0, is redrawn.
pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R, policy: &PasswordPolicy) -> String {
    let (min, max) = policy.bounds();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let len = rng.random_range(min..=max);
        let mut chars: Vec<u8> = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
            .collect();
        for position in index::sample(rng, len, policy.min_digits) {
            chars[position] = DIGITS[rng.random_range(0..DIGITS.len())];
        }

        let candidate: String = chars.into_iter().map(char::from).collect();
        if is_acceptable(&candidate, policy) {
            tracing::trace!(attempts, len, "Generated password");
            return candidate;
        }
    }
}
