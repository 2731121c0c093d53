//! Validating records with nebula-validation.
//!
//! Run: `cargo run -p nebula-validation --example record_validation`

use nebula_validation::prelude::*;

struct Audit {
    created_by: String,
}

record!(validatable Audit {
    #[json = "created_by"]
    created_by,
});

impl Validatable for Audit {
    fn validate(&self, ctx: &Context) -> Result<(), Error> {
        validate_record_with_context(ctx, self, &[field(&self.created_by, rules![required()])])
    }
}

struct Address {
    city: String,
    zip: String,
}

record!(Address {
    #[json = "city"]
    city,
    #[json = "zip"]
    zip,
});

struct Signup {
    audit: Audit,
    name: String,
    email: Option<String>,
    address: Address,
    tags: Vec<String>,
}

record!(Signup {
    #[embed]
    audit,
    #[json = "name"]
    name,
    #[json = "email,omitempty"]
    email,
    #[json = "address"]
    address,
    tags,
});

fn main() {
    direct_value_validation();
    record_validation();
    option_overrides();
}

/// Validate plain values with `validate`.
fn direct_value_validation() {
    println!("=== Direct Value Validation ===\n");

    let name = String::from("Ada");
    let bounded = validate(&name, &[&required(), &length(2, 10)]);
    println!("required + length(2, 10) on \"Ada\": {}", status(&bounded));

    let missing = validate(&None::<String>, &[&length(2, 10)]);
    println!("length(2, 10) on None:            {}", status(&missing));

    let blank = validate(&"", &[&required()]);
    println!("required on \"\":                   {}", status(&blank));

    let lowercase = string_rule(|s| s.chars().all(char::is_lowercase), "must be lowercase");
    let mixed = validate(&"Nebula", &[&lowercase]);
    println!("lowercase on \"Nebula\":             {}", status(&mixed));

    println!();
}

/// Validate record fields by reference and by name.
fn record_validation() {
    println!("=== Record Validation ===\n");

    let signup = Signup {
        audit: Audit {
            created_by: String::new(),
        },
        name: String::new(),
        email: Some(String::new()),
        address: Address {
            city: String::new(),
            zip: "75001".into(),
        },
        tags: vec!["a".into(); 6],
    };

    let result = validate_record(
        &signup,
        &[
            field(&signup.audit, rules![]),
            field(&signup.name, rules![required(), length(2, 50)]),
            field(&signup.email, rules![nil_or_not_empty()]),
            field_struct(
                &signup.address,
                vec![
                    field(&signup.address.city, rules![required()]),
                    field(&signup.address.zip, rules![length(5, 5)]),
                ],
            ),
            named_field("tags", rules![length(0, 5)]),
        ],
    );

    match &result {
        Ok(()) => println!("valid"),
        Err(err) => {
            println!("text: {err}");
            println!("json: {}", err.to_json());
        }
    }

    println!();
}

/// Override error key naming for one call.
fn option_overrides() {
    println!("=== Option Overrides ===\n");

    let ctx = Context::new().with_options([with_error_key_name(|meta| meta.name().to_uppercase())]);
    let address = Address {
        city: String::new(),
        zip: String::new(),
    };
    let result = validate_record_with_context(
        &ctx,
        &address,
        &[
            field(&address.city, rules![required()]),
            field(&address.zip, rules![required()]),
        ],
    );
    println!("upper-case keys: {}", status(&result));

    println!();
}

fn status(result: &Result<(), Error>) -> String {
    match result {
        Ok(()) => "ok".to_owned(),
        Err(err) => format!("error: {err}"),
    }
}
