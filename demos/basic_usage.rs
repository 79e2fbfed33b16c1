//! Basic usage: factories, successes, and a synchronous combinator chain.
//!
//! Run with: cargo run --example basic_usage

use verdict::definitions::{authentication, resource, validation};
use verdict::{details, ensure_outcome, try_outcome, Outcome, Success};

#[derive(Debug, Clone)]
struct User {
    id: u32,
    email: String,
    active: bool,
}

fn find_user(id: u32) -> Outcome<User> {
    match id {
        1 => Outcome::ok_with(User {
            id,
            email: "ada@example.com".to_owned(),
            active: true,
        }),
        2 => Outcome::ok_with(User {
            id,
            email: "grace@example.com".to_owned(),
            active: false,
        }),
        _ => resource::not_found()
            .with_detail("id", id.to_string())
            .into(),
    }
}

fn validate_email(email: &str) -> Outcome {
    ensure_outcome!(
        email.contains('@'),
        validation::invalid_format().with_details(details!["email" => "must contain @"])
    );
    Outcome::ok()
}

fn rename(id: u32, email: &str) -> Outcome<User> {
    try_outcome!(validate_email(email));
    let mut user = try_outcome!(find_user(id));
    ensure_outcome!(user.active, authentication::forbidden(), "user {} is disabled", user.id);
    user.email = email.to_owned();
    Outcome::success(Success::ok_with(user).with_message("email updated"))
}

fn main() {
    println!("=== Codes ===\n");
    for err in [
        resource::not_found(),
        validation::invalid_input(),
        authentication::unauthorized(),
    ] {
        println!("{:>6}  {}", err.code(), err);
    }

    println!("\n=== Chaining ===\n");
    for id in [1, 2, 3] {
        let outcome = find_user(id)
            .ensure_with(
                |user| user.active,
                |user| authentication::forbidden().with_detail("id", user.id.to_string()),
            )
            .map(|user| user.email);

        let line = outcome.match_value(
            |email| format!("user {id}: {email}"),
            |err| format!("user {id}: failed with {err}"),
        );
        println!("{line}");
    }

    println!("\n=== Early returns ===\n");
    for (id, email) in [(1, "ada@lovelace.dev"), (1, "nope"), (2, "grace@navy.mil"), (9, "x@y.z")] {
        match rename(id, email) {
            Outcome::Success(success) => {
                println!("{} -> {}", success, success.value().email);
            }
            Outcome::Failure(err) => {
                let details: Vec<String> = err.details().iter().map(ToString::to_string).collect();
                println!("{} [{}]", err, details.join(", "));
            }
        }
    }

    println!("\n=== Fallbacks ===\n");
    let email = find_user(7).map(|user| user.email).value_or_else(|err| format!("<{}>", err.code()));
    println!("fallback email: {email}");

    let created = Outcome::created().with_value(42);
    println!("created: {created}");
}
