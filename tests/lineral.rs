use heron_xnf::structures::{LinearSystem, Lineral};

mod construction {
    use super::*;

    #[test]
    fn canonical_form() {
        let l = Lineral::new(vec![3, 1, 2, 1]);
        assert_eq!(l.support(), &[1, 2, 3]);
        assert!(!l.has_constant());
        assert_eq!(l.leading_term(), 1);
    }

    #[test]
    fn zero_index_folds_into_constant() {
        let l = Lineral::new(vec![0, 2]);
        assert!(l.has_constant());
        assert_eq!(l.support(), &[2]);

        let again = Lineral::from_sorted(vec![0, 2], true);
        assert!(!again.has_constant());
        assert_eq!(again.support(), &[2]);
    }

    #[test]
    fn constants() {
        assert!(Lineral::zero().is_zero());
        assert!(Lineral::one().is_one());
        assert!(!Lineral::from_var(1).is_zero());
        assert_eq!(Lineral::zero().leading_term(), 0);
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn addition_is_symmetric_difference() {
        let a = Lineral::new(vec![1, 2]);
        let b = Lineral::new(vec![2, 3]);
        let sum = &a + &b;
        assert_eq!(sum.support(), &[1, 3]);

        let mut inplace = a.clone();
        inplace += &b;
        assert_eq!(inplace, sum);
    }

    #[test]
    fn addition_cancels() {
        let a = Lineral::new(vec![1, 2]);
        assert!((&a + &a).is_zero());

        let b = a.plus_one();
        assert!((&a + &b).is_one());
    }

    #[test]
    fn constant_arithmetic() {
        let mut l = Lineral::from_var(4);
        l.add_one();
        assert!(l.has_constant());
        assert_eq!(l.plus_one(), Lineral::from_var(4));
    }

    #[test]
    fn ordering_is_total() {
        let x1 = Lineral::from_var(1);
        let x1x2 = Lineral::new(vec![1, 2]);
        let x2 = Lineral::from_var(2);
        assert!(x1 < x1x2);
        assert!(x1x2 < x2);
        assert!(x1 < x1.plus_one());
    }
}

mod evaluation {
    use super::*;

    #[test]
    fn eval_tracks_the_constraint() {
        // x1 + 1 holds exactly when x1 is true
        let lit = Lineral::new(vec![0, 1]);
        assert!(lit.eval(&[true]));
        assert!(!lit.eval(&[false]));

        // x1 + x2 holds when the two agree
        let eq = Lineral::new(vec![1, 2]);
        assert!(eq.eval(&[true, true]));
        assert!(eq.eval(&[false, false]));
        assert!(!eq.eval(&[true, false]));
    }

    #[test]
    fn solve_flips_the_leading_variable() {
        let lit = Lineral::new(vec![0, 1]);
        let mut sol = vec![false];
        lit.solve(&mut sol);
        assert!(sol[0]);
        assert!(lit.eval(&sol));
    }
}

mod reduction {
    use super::*;

    #[test]
    fn reduce_eliminates_pivots() {
        let sys = LinearSystem::from_linerals(vec![
            Lineral::new(vec![1, 2]),
            Lineral::new(vec![2, 3]),
        ]);
        let mut l = Lineral::new(vec![1, 4]);
        assert!(l.reduce(&sys));
        for (&lt, _) in sys.pivots() {
            assert!(!l.contains(lt));
        }

        let mut untouched = Lineral::from_var(4);
        assert!(!untouched.reduce(&sys));
        assert_eq!(untouched, Lineral::from_var(4));
    }

    #[test]
    fn reduce_with_assignments() {
        // assignments[i] is the row assigning variable i
        let mut assignments = vec![Lineral::zero(); 5];
        assignments[1] = Lineral::new(vec![1, 2]);
        assignments[2] = Lineral::new(vec![0, 2]);

        let mut l = Lineral::from_var(1);
        assert!(l.reduce_with_assignments(&assignments));
        // x1 -> x2 -> 1
        assert!(l.is_one());
    }

    #[test]
    fn reduce_with_assignments_respects_levels() {
        let mut assignments = vec![Lineral::zero(); 5];
        assignments[1] = Lineral::new(vec![1, 2]);
        assignments[2] = Lineral::new(vec![0, 2]);
        let dls = vec![0, 0, 2, 0, 0];

        let mut l = Lineral::from_var(1);
        assert!(l.reduce_with_assignments_filtered(&assignments, &dls, 1));
        // the level-2 assignment of x2 is out of reach
        assert_eq!(l, Lineral::from_var(2));
    }

    #[test]
    fn lt_reduce_stops_at_unassigned_leading_term() {
        let mut assignments = vec![Lineral::zero(); 5];
        assignments[1] = Lineral::new(vec![1, 2]);

        let mut l = Lineral::new(vec![1, 3]);
        assert!(l.lt_reduce(&assignments));
        assert_eq!(l, Lineral::new(vec![2, 3]));
        assert!(!l.lt_reduce(&assignments));
    }
}
