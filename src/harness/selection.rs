use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::protocols::sidh_parameters::ParameterSetId;

/// The test categories, with the flag values of the external test constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TestCategory {
    TestsOnly = 1,
    Benchmarks = 2,
    EcIsogenyFunctions = 4,
    DiffieHellman = 8,
}

impl TestCategory {
    pub const ALL: [TestCategory; 4] = [
        TestCategory::TestsOnly,
        TestCategory::Benchmarks,
        TestCategory::EcIsogenyFunctions,
        TestCategory::DiffieHellman,
    ];

    pub const fn bit(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            TestCategory::TestsOnly => "tests",
            TestCategory::Benchmarks => "benchmarks",
            TestCategory::EcIsogenyFunctions => "EC/isogeny functions",
            TestCategory::DiffieHellman => "Diffie-Hellman",
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of test categories, stored as the union of their flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const EMPTY: CategoryMask = CategoryMask(0);
    pub const ALL: CategoryMask = CategoryMask(0xF);

    /// Build a mask from raw flags, dropping unknown bits.
    pub const fn from_bits(bits: u32) -> Self {
        CategoryMask(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, category: TestCategory) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn insert(&mut self, category: TestCategory) {
        self.0 |= category.bit();
    }

    pub fn remove(&mut self, category: TestCategory) {
        self.0 &= !category.bit();
    }

    /// The categories in the mask, in flag order.
    pub fn iter(self) -> impl Iterator<Item = TestCategory> {
        TestCategory::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<TestCategory> for CategoryMask {
    fn from(category: TestCategory) -> Self {
        CategoryMask(category.bit())
    }
}

impl BitOr<TestCategory> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: TestCategory) -> CategoryMask {
        CategoryMask(self.0 | rhs.bit())
    }
}

impl BitOrAssign<TestCategory> for CategoryMask {
    fn bitor_assign(&mut self, rhs: TestCategory) {
        self.insert(rhs)
    }
}

/// The work of one run: parameter sets in catalog order and a category mask.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestPlan {
    pub sets: Vec<ParameterSetId>,
    pub categories: CategoryMask,
}

impl TestPlan {
    pub fn new(sets: &[ParameterSetId], categories: CategoryMask) -> Self {
        // Keep catalog order whatever order the caller used
        let sets = ParameterSetId::ALL
            .into_iter()
            .filter(|id| sets.contains(id))
            .collect();
        Self { sets, categories }
    }
}

/// Which parameter sets and test categories are selected.
///
/// While `run_everything` is on, all sets and categories are selected and
/// the individual toggles are locked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestSelector {
    sets: [bool; 4],
    categories: CategoryMask,
    run_everything: bool,
}

impl TestSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect a parameter set. Returns whether the toggle was
    /// applied, which is not the case while `run_everything` is on.
    pub fn toggle_parameter_set(&mut self, id: ParameterSetId, on: bool) -> bool {
        if self.run_everything {
            return false;
        }
        self.sets[id.index()] = on;
        true
    }

    /// Select or deselect a category, with the same lock rule as
    /// `toggle_parameter_set`.
    pub fn toggle_category(&mut self, category: TestCategory, on: bool) -> bool {
        if self.run_everything {
            return false;
        }
        if on {
            self.categories.insert(category);
        } else {
            self.categories.remove(category);
        }
        true
    }

    /// Turning this on selects everything; turning it off clears everything.
    pub fn set_run_everything(&mut self, on: bool) {
        self.run_everything = on;
        if on {
            self.sets = [true; 4];
            self.categories = CategoryMask::ALL;
        } else {
            self.sets = [false; 4];
            self.categories = CategoryMask::EMPTY;
        }
    }

    pub fn run_everything(&self) -> bool {
        self.run_everything
    }

    /// Back to an empty selection with `run_everything` off.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_parameter_set_selected(&self, id: ParameterSetId) -> bool {
        self.sets[id.index()]
    }

    pub fn is_category_selected(&self, category: TestCategory) -> bool {
        self.categories.contains(category)
    }

    pub fn categories(&self) -> CategoryMask {
        self.categories
    }

    /// The selected parameter sets in catalog order.
    pub fn selected_sets(&self) -> Vec<ParameterSetId> {
        ParameterSetId::ALL
            .into_iter()
            .filter(|id| self.sets[id.index()])
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && !self.sets.iter().any(|s| *s)
    }

    pub fn build_plan(&self) -> TestPlan {
        TestPlan {
            sets: self.selected_sets(),
            categories: self.categories,
        }
    }
}
