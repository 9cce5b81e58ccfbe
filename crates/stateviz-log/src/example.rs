//! The built-in example log.
//!
//! Shown until a user supplies their own log. It touches all four container
//! kinds over four locations and ends by deleting or popping everything it
//! created, so every kind's removal path is visible.

use stateviz_types::Mutation;

use crate::log::EventLog;

/// Build the example log. Each call assigns fresh entry ids.
pub fn example_log() -> EventLog {
    EventLog::from_entries([
        ("model.py:23", vec![Mutation::set_add("divisible", "a")]),
        (
            "model.py:45",
            vec![
                Mutation::dict_set("replacements", "ka", "kv"),
                Mutation::array_push("my_array", 1.0),
                Mutation::var_set("symint_counter", "1"),
            ],
        ),
        (
            "model.py:98",
            vec![
                Mutation::set_add("divisible", "b"),
                Mutation::array_push("my_array", 2.0),
                Mutation::var_set("symint_counter", "2"),
            ],
        ),
        (
            "model.py:183",
            vec![
                Mutation::set_delete("divisible", "a"),
                Mutation::dict_delete("replacements", "ka"),
                Mutation::array_pop("my_array"),
                Mutation::var_delete("symint_counter"),
            ],
        ),
    ])
}
