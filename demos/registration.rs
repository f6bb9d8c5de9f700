//! Registration form validation
//!
//! Run with `RUST_LOG=validatable=trace cargo run --example registration` to
//! see the validation logs.

use tracing_subscriber::EnvFilter;
use validatable::prelude::*;

impl_validated_entity!(
    Registration,
    "registration",
    {
        username: Option<String>,
        email: String,
        age: u32,
        password: String,
        password_confirmation: String,
    },
    validate: {
        username: [required, string_length(3, 20), pattern("^[a-z0-9_]+$")],
        email: [required, format(email)],
        age: [range(13, 120)],
        password: [required, string_length(8, 128)],
    }
);

impl Registration {
    fn check_passwords(&mut self) {
        if self.password != self.password_confirmation {
            self.add_error(
                ["password", "password_confirmation"],
                "The passwords do not match.",
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut registration = Registration::new(
        Some("Ada Lovelace".to_string()),
        "ada@".to_string(),
        11,
        "hunter22".to_string(),
        "hunter23".to_string(),
    );
    registration.check_passwords();

    println!("{}", serde_json::to_string_pretty(&registration.report())?);

    registration.username = Some("ada".to_string());
    registration.email = "ada@example.com".to_string();
    registration.age = 36;

    // The password mismatch stays recorded for the lifetime of the entity.
    match registration.ensure_valid() {
        Ok(()) => println!("registration accepted"),
        Err(err) => println!("registration rejected: {}", err),
    }

    Ok(())
}
