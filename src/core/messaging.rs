//! Donor-to-student message construction.
//!
//! After a donation is reconciled, the UI opens a WhatsApp deep link with
//! a pre-filled introduction. The link opening is presentation glue; the
//! two deterministic rules behind it live here: the message template and
//! the contact-number normalization.

use crate::core::model::SupplyType;

/// Sri Lanka's calling code, used when the caller has no configured
/// override.
pub const DEFAULT_COUNTRY_CODE: &str = "94";

/// How the donor intends to hand the supplies over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShippingMethod {
    /// Courier or postal delivery
    Post,
    /// Dropping the items off at the school
    DropOff,
}

/// Converts a local-format phone number to international form by
/// replacing a leading trunk `0` with the country calling code. Numbers
/// without the trunk prefix are returned unchanged.
pub fn normalize_contact_number(number: &str, country_code: &str) -> String {
    let trimmed = number.trim();
    match trimmed.strip_prefix('0') {
        Some(rest) => format!("{country_code}{rest}"),
        None => trimmed.to_string(),
    }
}

/// Builds the pre-filled donor introduction message.
///
/// Deterministic for a given input: the supply phrasing follows the
/// donor's declared coverage and the shipping phrasing follows the
/// hand-over choice.
pub fn donor_message(
    student_name: &str,
    grade: &str,
    donor_name: &str,
    supply_type: SupplyType,
    shipping: ShippingMethod,
) -> String {
    let supply_text = match supply_type {
        SupplyType::Full => "everything you requested",
        SupplyType::Partial => "some of the items",
    };
    let ship_text = match shipping {
        ShippingMethod::Post => "courier/post",
        ShippingMethod::DropOff => "dropping them off at school",
    };

    format!(
        "Hi {student_name}, I found your request on BookFlow SL! \u{1f30a}\u{1f4da}\n\n\
         I'm {donor_name} and I'd like to help. I can provide {supply_text} for your \
         {grade} studies.\n\n\
         I will be sending them via {ship_text}.\n\n\
         Please let me know the best address/time to send them!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunk_prefix_becomes_country_code() {
        assert_eq!(
            normalize_contact_number("0771234567", DEFAULT_COUNTRY_CODE),
            "94771234567"
        );
    }

    #[test]
    fn number_without_trunk_prefix_is_unchanged() {
        assert_eq!(
            normalize_contact_number("94771234567", DEFAULT_COUNTRY_CODE),
            "94771234567"
        );
        assert_eq!(normalize_contact_number(" 771234567 ", "94"), "771234567");
    }

    #[test]
    fn full_supply_message_mentions_everything() {
        let message = donor_message(
            "Nimal Perera",
            "Grade 5",
            "Amara Silva",
            SupplyType::Full,
            ShippingMethod::Post,
        );

        assert!(message.starts_with("Hi Nimal Perera, I found your request on BookFlow SL!"));
        assert!(message.contains("I'm Amara Silva"));
        assert!(message.contains("everything you requested"));
        assert!(message.contains("for your Grade 5 studies"));
        assert!(message.contains("via courier/post"));
    }

    #[test]
    fn partial_drop_off_message_uses_alternate_phrasing() {
        let message = donor_message(
            "Fatima R.",
            "O/L (Grade 11)",
            "Amara Silva",
            SupplyType::Partial,
            ShippingMethod::DropOff,
        );

        assert!(message.contains("some of the items"));
        assert!(message.contains("via dropping them off at school"));
    }

    #[test]
    fn message_is_deterministic() {
        let build = || {
            donor_message(
                "Nimal Perera",
                "Grade 5",
                "Amara Silva",
                SupplyType::Full,
                ShippingMethod::Post,
            )
        };
        assert_eq!(build(), build());
    }
}
