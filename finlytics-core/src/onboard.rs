//! Six-step onboarding tutorial.
//!
//! Step 1 collects the profile and gates progress; steps 2-6 are read-only
//! walkthrough pages. Nothing here is persisted.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::OnboardError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Accountant,
    Bookkeeper,
    #[serde(rename = "Business Owner")]
    BusinessOwner,
    Developer,
    Other,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Accountant,
        Role::Bookkeeper,
        Role::BusinessOwner,
        Role::Developer,
        Role::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Accountant => "Accountant",
            Role::Bookkeeper => "Bookkeeper",
            Role::BusinessOwner => "Business Owner",
            Role::Developer => "Developer",
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts the label (case-insensitive) or its 1-based menu number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Role::ALL.get(i).copied())
                .ok_or_else(|| format!("no role number {n}"));
        }
        Role::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Submitted step-1 answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub role: Role,
    pub email: String,
}

impl Profile {
    pub fn first_name(&self) -> &str {
        first_name(Some(&self.full_name), "there")
    }
}

/// First whitespace-separated word of `full_name`, or `fallback`.
pub fn first_name<'a>(full_name: Option<&'a str>, fallback: &'a str) -> &'a str {
    full_name
        .and_then(|n| n.split_whitespace().next())
        .unwrap_or(fallback)
}

/// Step-1 form state while the user is typing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub full_name: String,
    pub role: Option<Role>,
    pub email: String,
}

impl ProfileDraft {
    /// First blocking problem, checked in form order.
    pub fn check(&self) -> Result<(), OnboardError> {
        if self.full_name.trim().chars().count() <= 1 {
            return Err(OnboardError::NameTooShort);
        }
        if self.role.is_none() {
            return Err(OnboardError::MissingRole);
        }
        if !is_valid_email(&self.email) {
            return Err(OnboardError::InvalidEmail);
        }
        Ok(())
    }

    pub fn can_proceed(&self) -> bool {
        self.check().is_ok()
    }

    pub fn submit(&self) -> Result<Profile, OnboardError> {
        self.check()?;
        Ok(Profile {
            full_name: self.full_name.trim().to_string(),
            role: self.role.ok_or(OnboardError::MissingRole)?,
            email: self.email.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Profile = 1,
    HowItWorks = 2,
    Categories = 3,
    Filters = 4,
    Export = 5,
    Ready = 6,
}

impl Step {
    pub const COUNT: u8 = 6;

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Step::Profile),
            2 => Some(Step::HowItWorks),
            3 => Some(Step::Categories),
            4 => Some(Step::Filters),
            5 => Some(Step::Export),
            6 => Some(Step::Ready),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    /// `Step n - 6` footer label
    pub fn progress_label(&self) -> String {
        format!("Step {} - {}", self.number(), Self::COUNT)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Profile => "Welcome to Finlytics",
            Step::HowItWorks => "How It Works",
            Step::Categories => "Transaction Categories",
            Step::Filters => "Smart Filters",
            Step::Export => "Export Your Data",
            Step::Ready => "You're All Set!",
        }
    }

    /// Static tutorial copy shown under the title
    pub fn body(&self) -> &'static [&'static str] {
        match self {
            Step::Profile => &[
                "Your intelligent bank statement parser that automates transaction extraction and categorization.",
            ],
            Step::HowItWorks => &[
                "1. Upload Your Statement: drop in a CSV, PDF or image of your bank statement",
                "2. Automatic Processing: we extract and categorize all transactions",
                "3. Filter & Export: use filters and export your organized data",
            ],
            Step::Categories => &[
                "Money In: positive amounts like salary, refunds and deposits",
                "Money Out: negative amounts like payments, purchases and withdrawals",
                "Other: special transactions like bank fees and interest",
            ],
            Step::Filters => &[
                "Category: filter by Money In, Money Out or Other",
                "Date Range: select specific date ranges",
                "Amount Range: set minimum and maximum amounts",
                "Pro Tip: combine multiple filters for precise results!",
            ],
            Step::Export => &[
                "Excel and CSV export of all filtered transactions with:",
                "Date, Description, Withdrawal, Deposit, Balance, Category",
            ],
            Step::Ready => &[
                "Fast: process in seconds",
                "Accurate: smart categorization",
                "Easy: no manual work",
            ],
        }
    }
}

/// Navigation state of the tutorial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: Step,
    profile: Option<Profile>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: Step::Profile,
            profile: None,
        }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.step == Step::Ready
    }

    /// Leave step 1 with a valid profile.
    pub fn submit_profile(&mut self, draft: &ProfileDraft) -> Result<(), OnboardError> {
        let profile = draft.submit()?;
        self.profile = Some(profile);
        self.step = Step::HowItWorks;
        Ok(())
    }

    /// Advance one page; a no-op on step 1 (use [`Wizard::submit_profile`])
    /// and on the last step.
    pub fn next(&mut self) -> Step {
        if self.step != Step::Profile {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
        }
        self.step
    }

    pub fn back(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Heading on the last page
    pub fn greeting(&self) -> String {
        let name = first_name(self.profile.as_ref().map(|p| p.full_name.as_str()), "You");
        format!("You're Ready to Go! {name}")
    }
}
