use crate::{fib, Config, Evaluator, Stage};
use sprig_base::Result;


pub(crate) fn fib_evaluators(config: Config) -> Result<Vec<Evaluator>> {
    let (program, entry) = fib::program()?;
    Stage::ALL
        .iter()
        .map(|stage| Evaluator::new(*stage, &program, entry, config))
        .collect()
}
