// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phone fields: a country picker plus a national-number input,
//! committing the combined `+{dial}{digits}` string.

use formwork_registry::{
    BindingContext, FieldWidget, RenderEnv, Ui, WidgetError, WidgetEvent,
};
use formwork_schema::{FieldSchema, PhoneOptions};
use formwork_value::Value;
use tracing::warn;

/// One entry of the country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166 alpha-2 code.
    pub iso2: &'static str,
    /// English display name.
    pub name: &'static str,
    /// Calling code without the leading `+`.
    pub dial: &'static str,
}

/// The built-in country table, region-heavy around the Gulf plus the
/// usual large markets. Ordering matters for dial-code disambiguation:
/// when two countries share a code the earlier entry wins (US before CA).
pub const COUNTRIES: &[Country] = &[
    Country { iso2: "SA", name: "Saudi Arabia", dial: "966" },
    Country { iso2: "AE", name: "United Arab Emirates", dial: "971" },
    Country { iso2: "EG", name: "Egypt", dial: "20" },
    Country { iso2: "JO", name: "Jordan", dial: "962" },
    Country { iso2: "KW", name: "Kuwait", dial: "965" },
    Country { iso2: "QA", name: "Qatar", dial: "974" },
    Country { iso2: "BH", name: "Bahrain", dial: "973" },
    Country { iso2: "OM", name: "Oman", dial: "968" },
    Country { iso2: "US", name: "United States", dial: "1" },
    Country { iso2: "CA", name: "Canada", dial: "1" },
    Country { iso2: "GB", name: "United Kingdom", dial: "44" },
    Country { iso2: "DE", name: "Germany", dial: "49" },
    Country { iso2: "FR", name: "France", dial: "33" },
    Country { iso2: "ES", name: "Spain", dial: "34" },
    Country { iso2: "IT", name: "Italy", dial: "39" },
    Country { iso2: "NL", name: "Netherlands", dial: "31" },
    Country { iso2: "TR", name: "Turkey", dial: "90" },
    Country { iso2: "IN", name: "India", dial: "91" },
    Country { iso2: "PK", name: "Pakistan", dial: "92" },
    Country { iso2: "BD", name: "Bangladesh", dial: "880" },
    Country { iso2: "CN", name: "China", dial: "86" },
    Country { iso2: "JP", name: "Japan", dial: "81" },
    Country { iso2: "KR", name: "South Korea", dial: "82" },
    Country { iso2: "RU", name: "Russia", dial: "7" },
    Country { iso2: "BR", name: "Brazil", dial: "55" },
    Country { iso2: "MX", name: "Mexico", dial: "52" },
    Country { iso2: "AU", name: "Australia", dial: "61" },
    Country { iso2: "ZA", name: "South Africa", dial: "27" },
    Country { iso2: "NG", name: "Nigeria", dial: "234" },
    Country { iso2: "KE", name: "Kenya", dial: "254" },
    Country { iso2: "MA", name: "Morocco", dial: "212" },
    Country { iso2: "TN", name: "Tunisia", dial: "216" },
];

/// Looks up a country by its alpha-2 code, case-insensitively.
#[must_use]
pub fn find_country(iso2: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.iso2.eq_ignore_ascii_case(iso2))
}

/// Case-insensitive search over country names and dial-code prefixes.
/// A query starting with `+` or digits matches dial codes.
#[must_use]
pub fn search_countries(query: &str) -> Vec<&'static Country> {
    let query = query.trim();
    if query.is_empty() {
        return COUNTRIES.iter().collect();
    }
    let digits = query.strip_prefix('+').unwrap_or(query);
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        return COUNTRIES.iter().filter(|c| c.dial.starts_with(digits)).collect();
    }
    let needle = query.to_lowercase();
    COUNTRIES
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// The longest dial-code prefix match for a `+`-prefixed number,
/// preferring earlier table entries on equal length.
fn dial_match(number: &str) -> Option<&'static Country> {
    let digits = number.strip_prefix('+')?;
    COUNTRIES
        .iter()
        .filter(|c| digits.starts_with(c.dial))
        // max_by_key keeps the LAST maximum, so reverse for first-wins.
        .rev()
        .max_by_key(|c| c.dial.len())
}

/// The phone widget: selected country, popover state, and search query.
#[derive(Debug)]
pub struct PhoneWidget {
    country: &'static Country,
    open: bool,
    query: String,
    synced: Option<String>,
}

impl PhoneWidget {
    /// Creates a widget using the configured default country.
    #[must_use]
    pub fn new(options: Option<&PhoneOptions>) -> Self {
        let default = PhoneOptions::default();
        let configured = options.map_or(default.country.as_str(), |o| o.country.as_str());
        let country = find_country(configured).unwrap_or_else(|| {
            warn!(country = configured, "unknown default country, using table head");
            &COUNTRIES[0]
        });
        Self {
            country,
            open: false,
            query: String::new(),
            synced: None,
        }
    }

    /// The currently selected country.
    #[must_use]
    pub fn country(&self) -> &'static Country {
        self.country
    }

    /// Picks the country back out of an externally set number.
    fn hydrate(&mut self, value: &Value) {
        let Some(number) = value.as_text() else {
            return;
        };
        if self.synced.as_deref() == Some(number) {
            return;
        }
        if let Some(country) = dial_match(number) {
            self.country = country;
        }
        self.synced = Some(number.to_owned());
    }

    /// The national part of the committed number, with the selected
    /// country's dial code stripped.
    fn national(&self, value: &Value) -> String {
        let number = value.as_text().unwrap_or_default();
        number
            .strip_prefix('+')
            .and_then(|digits| digits.strip_prefix(self.country.dial))
            .unwrap_or(number)
            .to_owned()
    }

    fn commit_number(&mut self, national: &str, ctx: &mut BindingContext) {
        let digits: String = national.chars().filter(char::is_ascii_digit).collect();
        let number = if digits.is_empty() {
            String::new()
        } else {
            format!("+{}{digits}", self.country.dial)
        };
        self.synced = Some(number.clone());
        ctx.commit(Value::Text(number));
    }
}

impl FieldWidget for PhoneWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        self.hydrate(ctx.value());
        let countries = search_countries(&self.query)
            .into_iter()
            .map(|c| Ui::Text(format!("{} (+{})", c.name, c.dial)))
            .collect();
        Ok(Ui::Group(vec![
            Ui::Popover {
                open: self.open,
                trigger: format!("{} +{}", self.country.iso2, self.country.dial),
                body: countries,
            },
            Ui::text_input(
                self.national(ctx.value()),
                schema.placeholder_text().map(str::to_owned),
            ),
        ]))
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        self.hydrate(ctx.value());
        match event {
            WidgetEvent::Input(text) => {
                self.commit_number(&text, ctx);
                Ok(())
            }
            WidgetEvent::SelectCountry(iso2) => {
                match find_country(&iso2) {
                    Some(country) => {
                        let national = self.national(ctx.value());
                        self.country = country;
                        self.commit_number(&national, ctx);
                        self.open = false;
                        self.query.clear();
                    }
                    None => warn!(country = iso2, "unknown country selection, ignoring"),
                }
                Ok(())
            }
            WidgetEvent::OpenPicker => {
                self.open = true;
                Ok(())
            }
            WidgetEvent::ClosePicker => {
                self.open = false;
                self.query.clear();
                Ok(())
            }
            WidgetEvent::QueryChanged(query) => {
                self.query = query;
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "phone" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env_call<R>(f: impl FnOnce(&mut RenderEnv<'_>) -> R) -> R {
        let registry = formwork_registry::FieldRegistry::new();
        let mut resources = formwork_registry::UrlAllocator::new();
        let mut env = RenderEnv::new(&registry, &mut resources);
        f(&mut env)
    }

    #[test]
    fn input_strips_non_digits_and_prefixes_the_dial_code() {
        let schema = FieldSchema::phone("mobile");
        let mut w = PhoneWidget::new(schema.phone_options());
        let mut ctx = BindingContext::new(Value::empty_text(), None);

        env_call(|env| {
            w.handle(WidgetEvent::Input("050 123-4567".to_owned()), &schema, &mut ctx, env)
        })
        .unwrap();
        assert_eq!(ctx.take_commit(), Some(Value::text("+9660501234567")));
    }

    #[test]
    fn empty_input_commits_empty_text() {
        let schema = FieldSchema::phone("mobile");
        let mut w = PhoneWidget::new(schema.phone_options());
        let mut ctx = BindingContext::new(Value::text("+966501234567"), None);
        env_call(|env| w.handle(WidgetEvent::Input(String::new()), &schema, &mut ctx, env))
            .unwrap();
        assert_eq!(ctx.take_commit(), Some(Value::empty_text()));
    }

    #[test]
    fn selecting_a_country_reprefixes_the_national_part() {
        let schema = FieldSchema::phone("mobile");
        let mut w = PhoneWidget::new(schema.phone_options());
        let mut ctx = BindingContext::new(Value::text("+966501234567"), None);

        env_call(|env| {
            w.handle(WidgetEvent::SelectCountry("AE".to_owned()), &schema, &mut ctx, env)
        })
        .unwrap();
        assert_eq!(w.country().iso2, "AE");
        assert_eq!(ctx.take_commit(), Some(Value::text("+971501234567")));
    }

    #[test]
    fn hydration_picks_the_longest_dial_match() {
        let schema = FieldSchema::phone("mobile");
        let mut w = PhoneWidget::new(schema.phone_options());
        let ctx = BindingContext::new(Value::text("+971501234567"), None);
        env_call(|env| w.render(&schema, &ctx, env)).unwrap();
        assert_eq!(w.country().iso2, "AE");
    }

    #[test]
    fn shared_dial_codes_resolve_to_the_earlier_entry() {
        // US and CA both use +1; the earlier table entry wins.
        assert_eq!(dial_match("+14165550123").map(|c| c.iso2), Some("US"));
        assert_eq!(dial_match("+966501234567").map(|c| c.iso2), Some("SA"));
        assert_eq!(dial_match("0501234567"), None);
    }

    #[test]
    fn search_matches_names_and_dial_prefixes() {
        let by_name = search_countries("saudi");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].iso2, "SA");

        let by_dial = search_countries("+96");
        let codes: Vec<&str> = by_dial.iter().map(|c| c.iso2).collect();
        assert!(codes.contains(&"SA"));
        assert!(codes.contains(&"JO"));
        assert!(!codes.contains(&"AE"));

        assert_eq!(search_countries("").len(), COUNTRIES.len());
    }

    #[test]
    fn unknown_default_country_falls_back_to_table_head() {
        let options = PhoneOptions {
            country: "ZZ".to_owned(),
        };
        let w = PhoneWidget::new(Some(&options));
        assert_eq!(w.country().iso2, COUNTRIES[0].iso2);
    }
}
