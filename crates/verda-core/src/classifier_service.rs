//! Converts a category payload into a single emissions value (kg CO2e).

use tracing::debug;
use verda_domain::CategoryPayload;

use crate::CoreError;

/// Carbon emission factors: fixed multipliers converting a category's raw
/// quantity into kg CO2e.
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.85;
pub const GAS_KG_PER_KG_LPG: f64 = 2.98;
pub const GROCERY_KG_PER_QUANTITY: f64 = 0.5;

pub struct ClassifierService;

impl ClassifierService {
    /// Computes total emissions for a payload. Pure: identical inputs always
    /// produce identical output, with no hidden state.
    pub fn compute(payload: &CategoryPayload) -> Result<f64, CoreError> {
        let total = match payload {
            CategoryPayload::Electricity { units } => {
                validate_quantity("units", *units)?;
                units * ELECTRICITY_KG_PER_KWH
            }
            CategoryPayload::Gas { kg } => {
                validate_quantity("kg", *kg)?;
                kg * GAS_KG_PER_KG_LPG
            }
            CategoryPayload::Grocery { items } => {
                let mut sum = 0.0;
                for (index, item) in items.iter().enumerate() {
                    validate_quantity(&format!("items[{index}].quantity"), item.quantity)?;
                    // Every quantity step weighs the same; `unit` carries no
                    // weight in the arithmetic.
                    sum += item.quantity * GROCERY_KG_PER_QUANTITY;
                }
                sum
            }
        };
        debug!(category = %payload.category(), total, "computed emissions");
        Ok(total)
    }
}

fn validate_quantity(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid_input(field, "quantity must be a number"));
    }
    if value <= 0.0 {
        return Err(CoreError::invalid_input(
            field,
            "quantity must be greater than zero",
        ));
    }
    Ok(())
}
