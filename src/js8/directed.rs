//! Directed-message surface form (§4.7): `"FROM TO: BODY"`, parsed outside
//! the 77-bit payload purely for message routing.

use super::error::Js8Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directed {
    pub from: String,
    pub to: String,
    pub body: String,
}

impl Directed {
    /// Parses `"FROM TO: BODY"`. Both callsigns are whitespace-separated;
    /// the colon marks the end of the routing prefix.
    pub fn parse(line: &str) -> Result<Self, Js8Error> {
        let (prefix, body) = line
            .split_once(':')
            .ok_or_else(|| Js8Error::MalformedDirected { line: line.to_string() })?;

        let mut parts = prefix.split_whitespace();
        let from = parts.next().ok_or_else(|| Js8Error::MalformedDirected { line: line.to_string() })?;
        let to = parts.next().ok_or_else(|| Js8Error::MalformedDirected { line: line.to_string() })?;
        if parts.next().is_some() {
            return Err(Js8Error::MalformedDirected { line: line.to_string() });
        }

        Ok(Directed {
            from: from.to_string(),
            to: to.to_string(),
            body: body.trim().to_string(),
        })
    }

    /// Renders back to `"FROM TO: BODY"`.
    pub fn render(&self) -> String {
        format!("{} {}: {}", self.from, self.to, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_directed_line() {
        let d = Directed::parse("N0YPR DL1ABC: HELLO").unwrap();
        assert_eq!(d.from, "N0YPR");
        assert_eq!(d.to, "DL1ABC");
        assert_eq!(d.body, "HELLO");
    }

    #[test]
    fn render_is_the_inverse_of_parse() {
        let line = "N0YPR DL1ABC: HELLO";
        let d = Directed::parse(line).unwrap();
        assert_eq!(d.render(), line);
    }

    #[test]
    fn rejects_a_line_with_no_colon() {
        assert!(Directed::parse("N0YPR DL1ABC HELLO").is_err());
    }

    #[test]
    fn rejects_a_line_with_too_many_routing_tokens() {
        assert!(Directed::parse("N0YPR DL1ABC EXTRA: HELLO").is_err());
    }
}
