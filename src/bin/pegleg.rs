//! Command-line front end for the PegLeg engine.
//!
//! ## Usage
//! ```bash
//! pegleg match --rule identifier "foo_bar baz"
//! pegleg match --rule unique-words --json "a b c a"
//! pegleg rules
//! ```

fn main() {
    pegleg::cli::run();
}
