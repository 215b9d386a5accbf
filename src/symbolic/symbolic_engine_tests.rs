//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::bindings;
    use crate::symbolic::engine_config::EngineConfig;
    use crate::symbolic::errors::{ExprError, ParseErrorKind};
    use crate::symbolic::monomial::Polynomial;
    use crate::symbolic::operators::Operator;
    use crate::symbolic::symbolic_engine::{Bindings, Expression, fix_value};
    use crate::symbolic::symbolic_functions::Function;
    use approx::assert_relative_eq;

    fn parse(text: &str) -> Expression {
        Expression::parse(text, &['x', 'y']).unwrap()
    }

    fn numeric(text: &str) -> Result<f64, ExprError> {
        parse(text).evaluate(&Bindings::new())
    }

    #[test]
    fn test_literal_expressions_agree_in_both_modes() {
        for (text, expected) in [
            ("2+3*4", 14.0),
            ("(2+3)*4", 20.0),
            ("10-2-3", 5.0),
            ("2^3^2", 64.0),
            ("2*-3", -6.0),
            ("2--3", 5.0),
            ("7%3+4!", 25.0),
            ("-4%3", -1.0),
            ("(-4)%3", 2.0),
        ] {
            let direct = numeric(text).unwrap();
            assert_relative_eq!(direct, expected);
            let folded = parse(text).evaluate_symbolic().unwrap();
            assert_eq!(folded, Expression::constant(expected), "symbolic {}", text);
            assert_relative_eq!(folded.evaluate(&Bindings::new()).unwrap(), direct);
        }
    }

    #[test]
    fn test_equal_precedence_chains_group_to_the_left() {
        // the rightmost operator of a chain becomes the root
        assert_eq!(parse("10-2-3").to_calculus_string(), "((10-2)-3)");
        assert_eq!(numeric("10-2-3"), Ok(5.0));
        assert_eq!(numeric("100/10/5"), Ok(2.0));
        assert_eq!(parse("8/4*2").to_calculus_string(), "((8/4)*2)");
    }

    #[test]
    fn test_function_domain_failures() {
        assert!(matches!(numeric("ln(-1)"), Err(ExprError::Domain { .. })));
        assert!(matches!(numeric("log(2,-1)"), Err(ExprError::Domain { .. })));
        assert!(matches!(numeric("log(8,1)"), Err(ExprError::Domain { .. })));
        assert_relative_eq!(numeric("log(8, 2)").unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(numeric("sin(pi/2)").unwrap(), 1.0);
        assert_relative_eq!(numeric("ln(e)").unwrap(), 1.0);
    }

    #[test]
    fn test_arity_is_checked_at_evaluation_only() {
        let expr = parse("log(x)");
        assert!(matches!(
            expr.evaluate(&bindings!('x' => 2)),
            Err(ExprError::Arity { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_bindings() {
        let expr = parse("x+1");
        assert_eq!(
            expr.evaluate(&Bindings::new()),
            Err(ExprError::UnboundUnknown('x'))
        );
        assert_eq!(expr.evaluate(&bindings!('x' => 2)), Ok(3.0));
        let from_pairs: Bindings = [fix_value('x', 2.0), fix_value('y', 5.0)].into_iter().collect();
        assert_eq!(parse("x*y").evaluate(&from_pairs), Ok(10.0));
    }

    #[test]
    fn test_malformed_input() {
        match Expression::parse("(2+3", &[]) {
            Err(ExprError::Parse(e)) => {
                assert_eq!(e.kind, ParseErrorKind::UnmatchedParenthesis);
                assert_eq!(e.offset, 0);
                assert_eq!(e.render(), "(2+3 ...\n^");
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
        // an operator after an operator is only accepted as a unary minus
        assert!(Expression::parse("2*-3", &[]).is_ok());
        assert!(matches!(
            Expression::parse("2*/3", &[]),
            Err(ExprError::Parse(e)) if e.kind == ParseErrorKind::InvalidValue
        ));
    }

    #[test]
    fn test_factorial_domain() {
        assert!(matches!(numeric("3.5!"), Err(ExprError::Domain { .. })));
        assert_eq!(numeric("4!"), Ok(24.0));
        assert_eq!(numeric("0!"), Ok(1.0));
    }

    #[test]
    fn test_symbolic_normal_forms() {
        let sym = |text: &str| parse(text).evaluate_symbolic().unwrap();
        assert_eq!(sym("x+x").to_string(), "2*x");
        assert_eq!(sym("x*x").to_string(), "x^2");
        assert_eq!(sym("x-x"), Expression::Value(Polynomial::zero()));
        assert_eq!(sym("(2*x+4*y)/2").to_string(), "(x+2*y)");
        assert_eq!(sym("x/(x^2)").to_string(), "x^-1");
        assert_eq!(sym("(x+y)*(x-y)").to_string(), "(x^2-y^2)");
        let once = sym("3*x*y + y*x - 2");
        assert_eq!(once.evaluate_symbolic().unwrap(), once);
        assert_eq!(once.to_string(), "(4*x*y-2)");
    }

    #[test]
    fn test_symbolic_and_numeric_agree_on_polynomials() {
        let text = "(x+1)^2 - 2*x*(y-1) + x/2";
        let b = bindings!('x' => 1.5, 'y' => -0.5);
        let direct = parse(text).evaluate(&b).unwrap();
        let folded = parse(text).evaluate_symbolic().unwrap();
        assert!(matches!(folded, Expression::Calculus { .. }));
        assert_relative_eq!(folded.evaluate(&b).unwrap(), direct, epsilon = 1e-12);

        let text = "(x+1)*(x+1) - 2*x*(y-1) + x/2";
        let folded = parse(text).evaluate_symbolic().unwrap();
        assert!(folded.as_polynomial().is_some());
        assert_relative_eq!(folded.evaluate(&b).unwrap(), direct, epsilon = 1e-12);
    }

    #[test]
    fn test_display_round_trips() {
        for text in [
            "2+3*4",
            "(2+3)*4",
            "10-(2-3)",
            "10-2-3",
            "2^(3^2)",
            "-x*y",
            "(-x)^2",
            "-(x+y)",
            "log(x+1, 2)/cos(y)",
            "(x+1)!",
            "x%(y+1)",
            "2*-3",
        ] {
            let expr = parse(text);
            let printed = expr.to_string();
            let reparsed = Expression::parse(&printed, &['x', 'y']).unwrap();
            assert_eq!(
                reparsed.to_calculus_string(),
                expr.to_calculus_string(),
                "{} printed as {}",
                text,
                printed
            );
        }
    }

    #[test]
    fn test_symbolic_results_print_back_to_the_same_value() {
        let b = bindings!('x' => 2, 'y' => 3);
        for text in [
            "2^(2*y)",
            "(x*y)^y",
            "(2*x)!",
            "(2*x)%3",
            "(x^2)^y",
            "y^(x^2)",
            "(-x)^y",
            "x^(-y)",
            "(x+y)%(2*x)",
        ] {
            let simplified = parse(text).evaluate_symbolic().unwrap();
            let printed = simplified.to_string();
            let reparsed = Expression::parse(&printed, &['x', 'y']).unwrap();
            let expected = parse(text).evaluate(&b).unwrap();
            assert_relative_eq!(simplified.evaluate(&b).unwrap(), expected);
            assert_relative_eq!(
                reparsed.evaluate(&b).unwrap(),
                expected,
                epsilon = 1e-12
            );
            let from_calculus =
                Expression::parse(&simplified.to_calculus_string(), &['x', 'y']).unwrap();
            assert_relative_eq!(from_calculus.evaluate(&b).unwrap(), expected, epsilon = 1e-12);
        }
        let kept = parse("(2*x)%3").evaluate_symbolic().unwrap();
        assert_eq!(kept.to_string(), "(2*x)%3");
        assert_eq!(kept.to_calculus_string(), "((2*x)%3)");
        assert_eq!(
            parse("2^(2*y)").evaluate_symbolic().unwrap().to_string(),
            "2^(2*y)"
        );
    }

    #[test]
    fn test_decimal_literals_in_expressions() {
        assert_eq!(parse("0.5*x").evaluate(&bindings!('x' => 2)), Ok(1.0));
        assert_eq!(numeric("2.5+.25"), Ok(2.75));
        assert_eq!(
            parse("0.5*x").evaluate_symbolic().unwrap().to_string(),
            "0.5*x"
        );
    }

    #[test]
    fn test_long_sums_parse_and_simplify() {
        let sum = vec!["x"; 600].join("+");
        let expr = Expression::parse(&sum, &['x']).unwrap();
        assert_eq!(expr.evaluate(&bindings!('x' => 1)), Ok(600.0));
        assert_eq!(expr.evaluate_symbolic().unwrap().to_string(), "600*x");
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(parse("10 - (2 - 3)").to_string(), "10-(2-3)");
        assert_eq!(parse("(10-2)-3").to_string(), "10-2-3");
        assert_eq!(parse("log(x, 2)").to_string(), "log(x, 2)");
        assert_eq!(parse("log(x,2)").to_calculus_string(), "log(x, 2)");
        assert_eq!(parse("-x").to_string(), "-x");
        assert_eq!(parse("4!").to_calculus_string(), "(4!)");
    }

    #[test]
    fn test_unknowns_and_substitution() {
        let expr = parse("y*cos(x) + x^2");
        assert_eq!(expr.unknowns(), vec!['x', 'y']);
        let fixed = expr.set_unknown('x', 0.0);
        assert_eq!(fixed.unknowns(), vec!['y']);
        assert_eq!(fixed.evaluate(&bindings!('y' => 3)), Ok(3.0));
        // set_unknown leaves its receiver untouched
        assert_eq!(expr.unknowns(), vec!['x', 'y']);
        assert!(Expression::parse("pi*e", &[]).unwrap().unknowns().is_empty());
    }

    #[test]
    fn test_constructors_enforce_operands() {
        let two = Expression::constant(2.0);
        assert_eq!(
            Expression::calculus(Operator::Mul, None, Some(two.clone())),
            Err(ParseErrorKind::MissingOperand(Operator::Mul))
        );
        assert_eq!(
            Expression::calculus(Operator::Fact, Some(two.clone()), Some(two.clone())),
            Err(ParseErrorKind::UnexpectedOperand(Operator::Fact))
        );
        let neg = Expression::calculus(Operator::Sub, None, Some(two.clone())).unwrap();
        assert_eq!(neg.evaluate(&Bindings::new()), Ok(-2.0));
        let call = Expression::function(Function::Cos, vec![Expression::constant(0.0)]);
        assert_eq!(call.evaluate(&Bindings::new()), Ok(1.0));
    }

    #[test]
    fn test_parse_with_config() {
        let config = EngineConfig::from_document("engine\n  unknowns: t\n  max_depth: 4\n").unwrap();
        let expr = Expression::parse_with_config("t^2", &config).unwrap();
        assert_eq!(expr.evaluate(&bindings!('t' => 3)), Ok(9.0));
        assert_eq!(
            Expression::parse_with_config("------t", &config),
            Err(ExprError::NestingTooDeep { limit: 4 })
        );
        assert!(Expression::parse_with_config("x", &config).is_err());
    }

    #[test]
    fn test_expressions_are_shared_between_threads() {
        let expr = parse("x*x - y");
        let batch: Vec<Bindings> = (0..16).map(|i| bindings!('x' => i, 'y' => i)).collect();
        let results = expr.evaluate_batch(&batch);
        for (i, r) in results.into_iter().enumerate() {
            let i = i as f64;
            assert_eq!(r, Ok(i * i - i));
        }
    }
}
