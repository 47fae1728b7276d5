//! Built-in data-generation provider.
//!
//! A deliberately small catalog so templates work out of the box. Extend it
//! with [`Registry::extend`] for project-specific fields, or build a
//! [`Registry`] from scratch.
//!
//! | Path | Example |
//! |------|---------|
//! | `name.firstName`, `name.lastName`, `name.fullName`, `name.prefix`, `name.username` | `Ada`, `Ada Lovelace` |
//! | `address.city`, `address.country`, `address.streetName`, `address.streetAddress`, `address.zipCode` | `42 Maple Street` |
//! | `internet.emailAddress`, `internet.domainName`, `internet.url` | `ada.lovelace@example.org` |
//! | `number.digit`, `number.randomNumber`, `number.percentage` | `7`, `48213`, `63.25` |
//! | `lorem.word`, `lorem.sentence` | `Lorem ipsum dolor.` |
//! | `bool.bool`, `uuid` | `true`, `4f0c…` |

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::provider::Registry;
use crate::value::Value;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Hedy", "Ivan",
    "John", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Sophie", "Tim", "Yukihiro", "Zhang",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Cerf", "Dijkstra", "Hamilton", "Hopper", "Kay", "Knuth", "Lamarr",
    "Liskov", "Lovelace", "McCarthy", "Perlman", "Ritchie", "Shannon", "Sutherland", "Thompson",
    "Torvalds", "Turing", "Wirth",
];

const PREFIXES: &[&str] = &["Mr.", "Mrs.", "Ms.", "Miss", "Dr."];

const CITIES: &[&str] = &[
    "Amsterdam", "Berlin", "Bordeaux", "Buenos Aires", "Cape Town", "Kyoto", "Lisbon", "Lyon",
    "Montreal", "Nairobi", "Oslo", "Seoul", "Toulouse", "Valparaiso", "Wellington",
];

const COUNTRIES: &[&str] = &[
    "Argentina", "Canada", "Chile", "France", "Germany", "Japan", "Kenya", "Netherlands",
    "New Zealand", "Norway", "Portugal", "South Africa", "South Korea",
];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Boulevard", "Way"];

const STREET_STEMS: &[&str] = &[
    "Maple", "Oak", "Cedar", "Elm", "Harbor", "Hill", "Lake", "Mill", "Park", "River", "Station",
];

const TLDS: &[&str] = &["com", "org", "net", "io", "dev"];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

fn pick(rng: &mut dyn RngCore, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn first_name(rng: &mut dyn RngCore) -> &'static str {
    pick(rng, FIRST_NAMES)
}

fn last_name(rng: &mut dyn RngCore) -> &'static str {
    pick(rng, LAST_NAMES)
}

fn username(rng: &mut dyn RngCore) -> String {
    let first = first_name(rng).to_lowercase();
    let last = last_name(rng).to_lowercase();
    format!("{first}.{last}")
}

fn domain_name(rng: &mut dyn RngCore) -> String {
    let word = pick(rng, WORDS);
    let tld = pick(rng, TLDS);
    format!("{word}.{tld}")
}

fn street_name(rng: &mut dyn RngCore) -> String {
    let stem = pick(rng, STREET_STEMS);
    let suffix = pick(rng, STREET_SUFFIXES);
    format!("{stem} {suffix}")
}

fn sentence(rng: &mut dyn RngCore) -> String {
    let len = rng.gen_range(4..=10);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let mut text = words.join(" ");
    if let Some(first) = text.get(..1) {
        let upper = first.to_uppercase();
        text.replace_range(..1, &upper);
    }
    text.push('.');
    text
}

/// A version-4 UUID drawn from `rng`, so seeded runs repeat it.
pub fn uuid_v4(rng: &mut dyn RngCore) -> uuid::Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

fn name() -> Registry {
    Registry::new("Name")
        .method("firstName", |rng| first_name(rng).into())
        .method("lastName", |rng| last_name(rng).into())
        .method("fullName", |rng| {
            let first = first_name(rng);
            let last = last_name(rng);
            format!("{first} {last}").into()
        })
        .method("prefix", |rng| pick(rng, PREFIXES).into())
        .method("username", |rng| username(rng).into())
}

fn address() -> Registry {
    Registry::new("Address")
        .method("city", |rng| pick(rng, CITIES).into())
        .method("country", |rng| pick(rng, COUNTRIES).into())
        .method("streetName", |rng| street_name(rng).into())
        .method("streetAddress", |rng| {
            let number: u32 = rng.gen_range(1..=999);
            format!("{number} {}", street_name(rng)).into()
        })
        .method("zipCode", |rng| {
            format!("{:05}", rng.gen_range(0..100_000u32)).into()
        })
}

fn internet() -> Registry {
    Registry::new("Internet")
        .method("domainName", |rng| domain_name(rng).into())
        .method("emailAddress", |rng| {
            let user = username(rng);
            format!("{user}@{}", domain_name(rng)).into()
        })
        .method("url", |rng| format!("https://www.{}", domain_name(rng)).into())
}

fn number() -> Registry {
    Registry::new("Number")
        .method("digit", |rng| Value::Int(rng.gen_range(0..10)))
        .method("randomNumber", |rng| Value::Int(rng.gen_range(0..1_000_000)))
        .method("percentage", |rng| {
            let hundredths: u32 = rng.gen_range(0..=10_000);
            Value::Float(f64::from(hundredths) / 100.0)
        })
}

fn lorem() -> Registry {
    Registry::new("Lorem")
        .method("word", |rng| pick(rng, WORDS).into())
        .method("sentence", |rng| sentence(rng).into())
}

/// The stock provider, type name `Faker`.
pub fn provider() -> Registry {
    Registry::new("Faker")
        .nested("name", name())
        .nested("address", address())
        .nested("internet", internet())
        .nested("number", number())
        .nested("lorem", lorem())
        .nested("bool", Registry::new("Bool").method("bool", |rng| Value::Bool(rng.gen())))
        .method("uuid", |rng| uuid_v4(rng).to_string().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use crate::resolver::resolve_path;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn root() -> Arc<dyn Provider> {
        Arc::new(provider())
    }

    fn resolve(path: &str, seed: u64) -> Value {
        resolve_path(&root(), path, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_every_listed_path_resolves_to_a_value() {
        let mut rng = StdRng::seed_from_u64(1);
        for path in provider().paths() {
            let value = resolve_path(&root(), &path, &mut rng).unwrap();
            assert!(!value.is_null(), "{path} resolved to null");
            assert!(!value.to_string().is_empty(), "{path} rendered empty");
        }
    }

    #[test]
    fn test_catalog_paths() {
        let paths = provider().paths();
        for expected in [
            "name.firstName",
            "name.fullName",
            "address.streetAddress",
            "internet.emailAddress",
            "number.randomNumber",
            "lorem.sentence",
            "bool.bool",
            "uuid",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_full_name_has_two_parts() {
        let full = resolve("name.fullName", 9).to_string();
        let parts: Vec<&str> = full.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert!(FIRST_NAMES.contains(&parts[0]));
        assert!(LAST_NAMES.contains(&parts[1]));
    }

    #[test]
    fn test_email_shape() {
        let email = resolve("internet.emailAddress", 4).to_string();
        let (user, domain) = email.split_once('@').unwrap();
        assert!(user.contains('.'));
        assert!(domain.contains('.'));
    }

    #[test]
    fn test_zip_code_is_five_digits() {
        for seed in 0..20 {
            let zip = resolve("address.zipCode", seed).to_string();
            assert_eq!(zip.len(), 5);
            assert!(zip.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_sentence_is_capitalized_and_terminated() {
        let sentence = resolve("lorem.sentence", 12).to_string();
        assert!(sentence.ends_with('.'));
        assert!(sentence.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn test_uuid_parses_and_is_seeded() {
        let a = resolve("uuid", 5).to_string();
        let b = resolve("uuid", 5).to_string();
        assert_eq!(a, b);
        let parsed = uuid::Uuid::parse_str(&a).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_digit_range() {
        for seed in 0..20 {
            match resolve("number.digit", seed) {
                Value::Int(n) => assert!((0..10).contains(&n)),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_chained_scalar_method_on_generated_value() {
        let upper = resolve("name.lastName.uppercase", 3).to_string();
        assert_eq!(upper, upper.to_uppercase());
        assert!(LAST_NAMES.iter().any(|n| n.to_uppercase() == upper));
    }
}
