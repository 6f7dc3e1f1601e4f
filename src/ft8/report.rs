//! Standard-message report field (§4.6): a signed −30..+99 report, or one
//! of the acknowledgement tokens RRR/73/RR73, packed into 15 bits.

use super::error::MessageError;

const RRR: u16 = 1;
const CODE_73: u16 = 2;
const RR73: u16 = 3;

/// Packs a report field token.
pub fn pack(token: &str) -> Result<u16, MessageError> {
    match token {
        "RRR" => Ok(RRR),
        "73" => Ok(CODE_73),
        "RR73" => Ok(RR73),
        _ => {
            let value: i32 = token
                .parse()
                .map_err(|_| MessageError::InvalidReport { report: token.to_string() })?;
            if !(-30..=99).contains(&value) {
                return Err(MessageError::InvalidReport { report: token.to_string() });
            }
            Ok((value + 35) as u16)
        }
    }
}

/// Unpacks a report field value back into its token string.
pub fn unpack(value: u16) -> Result<String, MessageError> {
    match value {
        RRR => Ok("RRR".to_string()),
        CODE_73 => Ok("73".to_string()),
        RR73 => Ok("RR73".to_string()),
        v => {
            let signed = v as i32 - 35;
            if !(-30..=99).contains(&signed) {
                return Err(MessageError::InvalidReport { report: v.to_string() });
            }
            Ok(format!("{signed:+}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_special_tokens() {
        for token in ["RRR", "73", "RR73"] {
            let packed = pack(token).unwrap();
            assert_eq!(unpack(packed).unwrap(), token);
        }
    }

    #[test]
    fn roundtrips_a_numeric_report() {
        let packed = pack("-12").unwrap();
        assert_eq!(unpack(packed).unwrap(), "-12");
        let packed = pack("+05").unwrap();
        assert_eq!(unpack(packed).unwrap(), "+5");
    }

    #[test]
    fn rejects_out_of_range_report() {
        assert!(pack("100").is_err());
        assert!(pack("-31").is_err());
    }
}
