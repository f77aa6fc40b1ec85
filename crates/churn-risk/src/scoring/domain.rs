use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Slider bounds and defaults carried over from the profile input surface.
pub const TENURE_MONTHS_MIN: u32 = 0;
pub const TENURE_MONTHS_MAX: u32 = 72;
pub const TENURE_MONTHS_DEFAULT: u32 = 12;
pub const MONTHLY_CHARGES_MIN: u32 = 20;
pub const MONTHLY_CHARGES_MAX: u32 = 150;
pub const MONTHLY_CHARGES_DEFAULT: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl ContractType {
    pub const fn ordered() -> [Self; 3] {
        [Self::MonthToMonth, Self::OneYear, Self::TwoYear]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }

    /// One-hot column name this option maps to in the trained schema.
    pub const fn schema_column(self) -> &'static str {
        match self {
            Self::MonthToMonth => "Contract_Month-to-month",
            Self::OneYear => "Contract_One year",
            Self::TwoYear => "Contract_Two year",
        }
    }
}

impl FromStr for ContractType {
    type Err = ProfileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "month-to-month" | "month_to_month" => Ok(Self::MonthToMonth),
            "one year" | "one-year" | "one_year" => Ok(Self::OneYear),
            "two year" | "two-year" | "two_year" => Ok(Self::TwoYear),
            other => Err(ProfileError::UnknownOption {
                field: "contract",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl InternetService {
    pub const fn ordered() -> [Self; 3] {
        [Self::Dsl, Self::FiberOptic, Self::No]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }

    pub const fn schema_column(self) -> &'static str {
        match self {
            Self::Dsl => "Internet_Service_DSL",
            Self::FiberOptic => "Internet_Service_Fiber optic",
            Self::No => "Internet_Service_No",
        }
    }
}

impl FromStr for InternetService {
    type Err = ProfileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dsl" => Ok(Self::Dsl),
            "fiber optic" | "fiber-optic" | "fiber_optic" => Ok(Self::FiberOptic),
            "no" | "none" => Ok(Self::No),
            other => Err(ProfileError::UnknownOption {
                field: "internet service",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    ElectronicCheck,
    MailedCheck,
    BankTransferAutomatic,
    CreditCardAutomatic,
}

impl PaymentMethod {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ElectronicCheck,
            Self::MailedCheck,
            Self::BankTransferAutomatic,
            Self::CreditCardAutomatic,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ElectronicCheck => "Electronic check",
            Self::MailedCheck => "Mailed check",
            Self::BankTransferAutomatic => "Bank transfer (automatic)",
            Self::CreditCardAutomatic => "Credit card (automatic)",
        }
    }

    pub const fn schema_column(self) -> &'static str {
        match self {
            Self::ElectronicCheck => "Payment_Method_Electronic check",
            Self::MailedCheck => "Payment_Method_Mailed check",
            Self::BankTransferAutomatic => "Payment_Method_Bank transfer (automatic)",
            Self::CreditCardAutomatic => "Payment_Method_Credit card (automatic)",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ProfileError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "electronic check" | "electronic-check" | "electronic_check" => {
                Ok(Self::ElectronicCheck)
            }
            "mailed check" | "mailed-check" | "mailed_check" => Ok(Self::MailedCheck),
            "bank transfer (automatic)" | "bank-transfer" | "bank_transfer_automatic" => {
                Ok(Self::BankTransferAutomatic)
            }
            "credit card (automatic)" | "credit-card" | "credit_card_automatic" => {
                Ok(Self::CreditCardAutomatic)
            }
            other => Err(ProfileError::UnknownOption {
                field: "payment method",
                value: other.to_string(),
            }),
        }
    }
}

/// The five raw inputs describing a hypothetical customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub tenure_months: u32,
    pub monthly_charges: u32,
    pub contract: ContractType,
    pub internet_service: InternetService,
    pub payment_method: PaymentMethod,
}

impl CustomerProfile {
    pub fn new(
        tenure_months: u32,
        monthly_charges: u32,
        contract: ContractType,
        internet_service: InternetService,
        payment_method: PaymentMethod,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            tenure_months,
            monthly_charges,
            contract,
            internet_service,
            payment_method,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Enforce the numeric input bounds the profile surface advertises.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.tenure_months > TENURE_MONTHS_MAX {
            return Err(ProfileError::TenureOutOfRange {
                value: self.tenure_months,
            });
        }
        if self.monthly_charges < MONTHLY_CHARGES_MIN || self.monthly_charges > MONTHLY_CHARGES_MAX
        {
            return Err(ProfileError::MonthlyChargesOutOfRange {
                value: self.monthly_charges,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error(
        "tenure must be between {min} and {max} months, got {value}",
        min = TENURE_MONTHS_MIN,
        max = TENURE_MONTHS_MAX
    )]
    TenureOutOfRange { value: u32 },
    #[error(
        "monthly charges must be between {min} and {max}, got {value}",
        min = MONTHLY_CHARGES_MIN,
        max = MONTHLY_CHARGES_MAX
    )]
    MonthlyChargesOutOfRange { value: u32 },
    #[error("unknown {field} option '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

/// Risk band derived from the churn probability by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Low => "Maintain regular engagement and monitor usage trends.",
            Self::Medium => "Consider personalized offers or proactive customer outreach.",
            Self::High => {
                "Immediate retention intervention is advised \
                 (discounts, plan optimization, or support outreach)."
            }
        }
    }

    /// Bucket a probability: [0, 0.3) low, [0.3, 0.6) medium, [0.6, 1.0] high.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.6 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Outcome of one scoring run. Lives only for the duration of one response.
#[derive(Debug, Clone, Serialize)]
pub struct ChurnAssessment {
    pub probability: f64,
    pub tier: RiskTier,
    pub recommendation: &'static str,
    pub generated_at: DateTime<Utc>,
}
