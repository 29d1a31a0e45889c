use std::fmt;

use serde::Serialize;

/// Product category offered by the add-product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Economy,
    #[serde(rename = "SUV")]
    Suv,
    Luxury,
    Van,
    Other,
}

static ALL_CATEGORIES: &[Category] = &[
    Category::Economy,
    Category::Suv,
    Category::Luxury,
    Category::Van,
    Category::Other,
];

impl Category {
    /// Returns the label shown in the form and sent to the API.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Economy => "Economy",
            Category::Suv => "SUV",
            Category::Luxury => "Luxury",
            Category::Van => "Van",
            Category::Other => "Other",
        }
    }

    /// Returns all categories in display order.
    pub fn all() -> &'static [Category] {
        ALL_CATEGORIES
    }

    /// Steps through the select options, where `None` is the "Select a category" prompt.
    ///
    /// Forward from `None` lands on the first category; forward from the last
    /// category wraps back to `None`.
    pub fn cycle(current: Option<Category>, forward: bool) -> Option<Category> {
        let all = Self::all();
        // Option index 0 is the prompt, 1..=len are the categories.
        let slots = all.len() + 1;
        let index = current.map_or(0, |c| {
            all.iter().position(|&x| x == c).map_or(0, |i| i + 1)
        });
        let next = if forward {
            (index + 1) % slots
        } else {
            (index + slots - 1) % slots
        };
        next.checked_sub(1).map(|i| all[i])
    }
}

#[mutants::skip]
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
