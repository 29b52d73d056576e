//! Checkout
//!
//! Shipping details validation and order placement. A placed order empties the cart.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine, CartStorage, Notifier},
    pricing::OrderSummary,
};

/// Phone numbers must have this many digits once punctuation is stripped.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

/// A shipping form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    /// Given name
    FirstName,

    /// Family name
    LastName,

    /// Contact email address
    Email,

    /// Contact phone number
    Phone,

    /// Street address
    Address,

    /// City
    City,

    /// State or region
    State,

    /// Postal or ZIP code
    PostalCode,

    /// Country
    Country,
}

impl ShippingField {
    /// Every field, in form order.
    pub const ALL: [ShippingField; 9] = [
        ShippingField::FirstName,
        ShippingField::LastName,
        ShippingField::Email,
        ShippingField::Phone,
        ShippingField::Address,
        ShippingField::City,
        ShippingField::State,
        ShippingField::PostalCode,
        ShippingField::Country,
    ];

    /// The form name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            ShippingField::FirstName => "firstName",
            ShippingField::LastName => "lastName",
            ShippingField::Email => "email",
            ShippingField::Phone => "phone",
            ShippingField::Address => "address",
            ShippingField::City => "city",
            ShippingField::State => "state",
            ShippingField::PostalCode => "postalCode",
            ShippingField::Country => "country",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem with one shipping field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field
    pub field: ShippingField,

    /// What the shopper should fix
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checkout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// One or more shipping fields need fixing.
    #[error("Invalid shipping details: {}", join_errors(.0))]
    InvalidShipping(Vec<FieldError>),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where to send an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact email address
    pub email: String,

    /// Contact phone number, punctuation allowed
    pub phone: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// State or region
    pub state: String,

    /// Postal or ZIP code
    pub postal_code: String,

    /// Country
    pub country: String,
}

impl ShippingDetails {
    /// The value entered for `field`.
    pub fn value(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::PostalCode => &self.postal_code,
            ShippingField::Country => &self.country,
        }
    }

    /// Check every field, reporting one error per bad field in form order.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldError`]s found when any field is blank or malformed.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = ShippingField::ALL
            .into_iter()
            .filter_map(|field| self.check(field).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check(&self, field: ShippingField) -> Result<(), FieldError> {
        let value = self.value(field).trim();

        let message = if value.is_empty() {
            Some("This field is required")
        } else {
            match field {
                ShippingField::Email if !is_valid_email(value) => {
                    Some("Please enter a valid email address")
                }
                ShippingField::Phone if !is_valid_phone(value) => {
                    Some("Please enter a valid phone number")
                }
                _ => None,
            }
        };

        match message {
            Some(message) => Err(FieldError { field, message }),
            None => Ok(()),
        }
    }
}

/// `local@domain.tld` with no whitespace anywhere.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    email.match_indices('@').any(|(at, _)| {
        at > 0
            && email.get(at + 1..).is_some_and(|domain| {
                domain
                    .match_indices('.')
                    .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
            })
    })
}

fn is_valid_phone(phone: &str) -> bool {
    PHONE_DIGITS.contains(&phone.chars().filter(char::is_ascii_digit).count())
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Where the order ships
    pub shipping: ShippingDetails,

    /// The cart lines that were ordered
    pub lines: Vec<CartLine>,

    /// Totals charged
    pub summary: OrderSummary<'static>,
}

impl<S: CartStorage, N: Notifier> Cart<S, N> {
    /// Place an order for the cart's contents and empty the cart.
    ///
    /// The cart is left untouched when the order is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to order, or
    /// [`CheckoutError::InvalidShipping`] if the shipping details fail validation.
    pub fn checkout(&mut self, shipping: ShippingDetails) -> Result<Order, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        shipping.validate().map_err(CheckoutError::InvalidShipping)?;

        let order = Order {
            shipping,
            lines: self.lines().to_vec(),
            summary: OrderSummary::for_cart(self),
        };

        self.clear();

        tracing::info!(
            lines = order.lines.len(),
            total = %order.summary.total,
            "placed order"
        );

        Ok(order)
    }
}
