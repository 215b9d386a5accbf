/// a module turns a String expression into an expression tree
///
///# Example
/// ```
/// use RustedExpressions::symbolic::symbolic_engine::Expression;
/// let input = "2*x^2 + log(x+1, 2) - 4!";
/// let parsed_expression = Expression::parse(input, &['x']).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// println!(" fully parenthesized {}", parsed_expression.to_calculus_string());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) turns a String expression into an expression tree
/// 2) reduces the tree to a sum of monomials (symbolic evaluation)
/// 3) evaluates the tree for given values of the unknowns, or turns it into a Rust closure
/// 4) turns the tree back into a string for printing and control results
///# Example#
/// ```
/// use RustedExpressions::bindings;
/// use RustedExpressions::symbolic::symbolic_engine::Expression;
/// let input = "(2*x + 4*y)/2 + x";
/// let parsed_expression = Expression::parse(input, &['x', 'y']).unwrap();
/// // here you've got the sum of monomials
/// let simplified = parsed_expression.evaluate_symbolic().unwrap();
/// assert_eq!(simplified.to_string(), "(2*x+2*y)");
/// // numeric evaluation with bindings of the unknowns
/// let value = parsed_expression.evaluate(&bindings!('x' => 1, 'y' => 2)).unwrap();
/// assert_eq!(value, 6.0);
/// // or a closure of the unknowns in the given order
/// let f = parsed_expression.lambdify(&['x', 'y']).unwrap();
/// assert_eq!(f(&[1.0, 2.0]).unwrap(), 6.0);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// engine configuration (unknowns, nesting limit, log level) read from task documents
pub mod engine_config;
/// error types: structured parse errors and evaluation errors
pub mod errors;
/// monomials and polynomials: the "sum of monomials" normal form
pub mod monomial;
/// scalar primitives: pow, sqrt, ln, log, sin, cos, fact, modulo, min, max
pub mod numeric_primitives;
/// operator table: precedence, operand rules, numeric and symbolic rules
pub mod operators;
/// numeric evaluation, lambdification and parallel batch evaluation
pub mod symbolic_lambdify;
/// symbolic evaluation
pub mod symbolic_simplify;
/// function table: cos, sin, tan, ln, log
pub mod symbolic_functions;
/// parenthesis scanning utilities used by the parser
pub mod utils;

mod symbolic_engine_tests;
