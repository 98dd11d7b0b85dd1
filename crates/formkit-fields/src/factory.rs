//! Test-data factory specs.
//!
//! Every field type names a factory spec such as `text(50)` or
//! `integer(0,1000)`. [`FactorySpec`] parses that string and generates a
//! plausible sample value, which seeders and form tests use to fill a form
//! without hand-writing fixtures.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// A parsed factory spec: a kind plus its comma-separated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorySpec {
    pub kind: String,
    pub args: Vec<String>,
}

impl FactorySpec {
    /// Parses `kind` or `kind(arg, ...)`.
    ///
    /// ```
    /// use formkit_fields::FactorySpec;
    ///
    /// let spec = FactorySpec::parse("integer(1, 10)");
    /// assert_eq!(spec.kind, "integer");
    /// assert_eq!(spec.args, ["1", "10"]);
    /// ```
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let Some((kind, rest)) = spec.split_once('(') else {
            return Self {
                kind: spec.to_lowercase(),
                args: Vec::new(),
            };
        };

        let inner = rest.strip_suffix(')').unwrap_or(rest);
        let args = inner
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            kind: kind.trim().to_lowercase(),
            args,
        }
    }

    fn arg<T: std::str::FromStr>(&self, index: usize) -> Option<T> {
        self.args.get(index).and_then(|arg| arg.parse().ok())
    }

    /// Generates a sample value. Kinds without a generator yield `null`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self.kind.as_str() {
            "text" => {
                let max = self.arg::<usize>(0).unwrap_or(50).max(1);
                json!(sentence(rng, max))
            }
            "password" => {
                let len = self.arg::<usize>(0).unwrap_or(12).max(1);
                json!(random_token(rng, len))
            }
            "email" => {
                let user = random_token(rng, 8).to_lowercase();
                json!(format!("{user}@{}", pick(rng, DOMAINS)))
            }
            "url" => json!(format!("https://{}/{}", pick(rng, DOMAINS), pick(rng, WORDS))),
            "number" | "integer" => {
                let min = self.arg::<i64>(0).unwrap_or(0);
                let max = self.arg::<i64>(1).unwrap_or(1000).max(min);
                json!(rng.gen_range(min..=max))
            }
            "decimal" => {
                let places = self.arg::<i32>(0).unwrap_or(2).clamp(0, 6);
                let scale = 10f64.powi(places);
                let value = (rng.gen_range(0.0..1000.0) * scale).round() / scale;
                json!(value)
            }
            "boolean" => json!(rng.gen_bool(0.5)),
            "date" => json!(format!(
                "{:04}-{:02}-{:02}",
                rng.gen_range(1990..=2030),
                rng.gen_range(1..=12),
                rng.gen_range(1..=28)
            )),
            "time" => json!(format!("{:02}:{:02}", rng.gen_range(0..24), rng.gen_range(0..60))),
            "color" => json!(format!("#{:06x}", rng.gen_range(0..=0x00ff_ffff_u32))),
            "tel" => json!(format!(
                "+1{:03}{:03}{:04}",
                rng.gen_range(200..1000),
                rng.gen_range(200..1000),
                rng.gen_range(0..10000)
            )),
            _ => Value::Null,
        }
    }
}

impl fmt::Display for FactorySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({})", self.kind, self.args.join(","))
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Words joined by spaces, never longer than `max` characters.
fn sentence<R: Rng + ?Sized>(rng: &mut R, max: usize) -> String {
    let mut out = String::new();
    loop {
        let word = pick(rng, WORDS);
        let extra = if out.is_empty() { word.len() } else { word.len() + 1 };
        if out.len() + extra > max {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        out = random_token(rng, max.min(8)).to_lowercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_parse_plain_and_args() {
        assert_eq!(
            FactorySpec::parse("text(50)"),
            FactorySpec {
                kind: "text".into(),
                args: vec!["50".into()]
            }
        );
        let spec = FactorySpec::parse(" Email ");
        assert_eq!(spec.kind, "email");
        assert!(spec.args.is_empty());
        assert_eq!(FactorySpec::parse("integer( 1 , 9 )").args, ["1", "9"]);
        assert_eq!(FactorySpec::parse("text()").args, Vec::<String>::new());
    }

    #[test]
    fn test_display() {
        assert_eq!(FactorySpec::parse("integer(1, 9)").to_string(), "integer(1,9)");
        assert_eq!(FactorySpec::parse("boolean").to_string(), "boolean");
    }

    #[test]
    fn test_text_respects_length() {
        let mut rng = rng();
        for max in [1, 5, 20, 50] {
            let value = FactorySpec::parse(&format!("text({max})")).generate(&mut rng);
            let text = value.as_str().unwrap();
            assert!(!text.is_empty());
            assert!(text.len() <= max, "{text:?} longer than {max}");
        }
    }

    #[test]
    fn test_integer_range() {
        let mut rng = rng();
        let spec = FactorySpec::parse("integer(3,5)");
        for _ in 0..50 {
            let n = spec.generate(&mut rng).as_i64().unwrap();
            assert!((3..=5).contains(&n));
        }
    }

    #[test]
    fn test_shapes() {
        let mut rng = rng();
        let email = FactorySpec::parse("email").generate(&mut rng);
        assert!(email.as_str().unwrap().contains('@'));

        let url = FactorySpec::parse("url").generate(&mut rng);
        assert!(url.as_str().unwrap().starts_with("https://"));

        let color = FactorySpec::parse("color").generate(&mut rng);
        let color = color.as_str().unwrap();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));

        let date = FactorySpec::parse("date").generate(&mut rng);
        assert_eq!(date.as_str().unwrap().len(), 10);

        let tel = FactorySpec::parse("tel").generate(&mut rng);
        assert!(tel.as_str().unwrap().starts_with("+1"));

        assert!(FactorySpec::parse("boolean").generate(&mut rng).is_boolean());
        assert!(FactorySpec::parse("decimal(2)").generate(&mut rng).is_f64());
        assert_eq!(
            FactorySpec::parse("password").generate(&mut rng).as_str().unwrap().len(),
            12
        );
    }

    #[test]
    fn test_unknown_kind_is_null() {
        assert_eq!(FactorySpec::parse("choice").generate(&mut rng()), Value::Null);
        assert_eq!(FactorySpec::parse("nope(1)").generate(&mut rng()), Value::Null);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let spec = FactorySpec::parse("text(30)");
        assert_eq!(spec.generate(&mut rng()), spec.generate(&mut rng()));
    }
}
