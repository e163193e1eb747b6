#[cfg(test)]
mod test_selection {
    use sidh_harness::harness::selection::{CategoryMask, TestCategory, TestPlan, TestSelector};
    use sidh_harness::protocols::sidh_parameters::ParameterSetId;

    #[test]
    fn test_category_flags() {
        let bits: Vec<u32> = TestCategory::ALL.iter().map(|c| c.bit()).collect();
        assert_eq!(bits, vec![1, 2, 4, 8]);
        assert_eq!(CategoryMask::ALL.bits(), 0xF);
        assert_eq!(CategoryMask::from_bits(0xFF).bits(), 0xF);

        let mask = CategoryMask::from(TestCategory::TestsOnly) | TestCategory::DiffieHellman;
        assert_eq!(mask.bits(), 9);
        assert!(mask.contains(TestCategory::DiffieHellman));
        assert!(!mask.contains(TestCategory::Benchmarks));
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![TestCategory::TestsOnly, TestCategory::DiffieHellman]
        );
    }

    #[test]
    fn test_toggles() {
        let mut selector = TestSelector::new();
        assert!(selector.is_empty());

        assert!(selector.toggle_parameter_set(ParameterSetId::P751, true));
        assert!(selector.toggle_parameter_set(ParameterSetId::P503, true));
        assert!(selector.toggle_category(TestCategory::Benchmarks, true));
        assert!(selector.toggle_category(TestCategory::EcIsogenyFunctions, true));
        assert!(selector.toggle_category(TestCategory::Benchmarks, false));

        let plan = selector.build_plan();
        assert_eq!(plan.sets, vec![ParameterSetId::P503, ParameterSetId::P751]);
        assert_eq!(plan.categories.bits(), 4);
    }

    #[test]
    fn test_run_everything_locks_toggles() {
        let mut selector = TestSelector::new();
        selector.toggle_parameter_set(ParameterSetId::P434, true);
        selector.set_run_everything(true);
        assert!(selector.run_everything());

        assert!(!selector.toggle_parameter_set(ParameterSetId::P610, false));
        assert!(!selector.toggle_category(TestCategory::TestsOnly, false));
        assert!(selector.is_parameter_set_selected(ParameterSetId::P610));
        assert!(selector.is_category_selected(TestCategory::TestsOnly));

        let plan = selector.build_plan();
        assert_eq!(plan.sets, ParameterSetId::ALL.to_vec());
        assert_eq!(plan.categories, CategoryMask::ALL);

        // Switching it off clears the whole selection
        selector.set_run_everything(false);
        assert!(selector.is_empty());
        assert!(selector.toggle_category(TestCategory::TestsOnly, true));
    }

    #[test]
    fn test_reset() {
        let mut selector = TestSelector::new();
        selector.set_run_everything(true);
        selector.reset();
        assert_eq!(selector, TestSelector::default());
        assert!(!selector.run_everything());
    }

    #[test]
    fn test_plan_is_in_catalog_order() {
        let plan = TestPlan::new(
            &[ParameterSetId::P610, ParameterSetId::P434, ParameterSetId::P610],
            CategoryMask::ALL,
        );
        assert_eq!(plan.sets, vec![ParameterSetId::P434, ParameterSetId::P610]);
    }
}
