//! Solvers for training models.
//!
//! A solver repeatedly runs the model's forward/backward pass and applies
//! a weight-update rule, while managing the training cadence: printing
//! stats, testing, checkpointing and decaying the learning rate every n
//! steps. The cadence must not perturb the mathematics; the update rule
//! is the only place weights are mutated.

use crate::error::GradNetError;
use crate::model::Model;
use crate::tensor::{create, Tensor};

// Declare the sgd module
pub mod sgd;

// Re-export SgdSolver
pub use sgd::SgdSolver;

/// The weight-update rule a solver is polymorphic over.
pub trait Learn {
    /// Mutates the weight tensors in place using their accumulated
    /// gradients. `weight` and `weight_prev` are index-aligned;
    /// `weight_prev` holds whatever the rule stored there on the previous
    /// step (zeroes on the first step of a `train` call), so rules can
    /// compute momentum/decay terms against the prior step.
    fn learn(&mut self, weight: &[Tensor], weight_prev: &[Tensor], learning_rate: f32);
}

/// Cadence-driven training loop around a [`Learn`] rule.
pub struct Solver<R> {
    rule: R,
    /// Print the model stats every n steps.
    print_each: usize,
    /// Test the model every n steps.
    test_each: usize,
    /// Save the model every n steps.
    save_each: usize,
    /// Scale the learning rate every n steps.
    lr_scale_each: usize,
    /// Learning rate scale.
    lr_scale: f32,
    /// List of weights for a model (current value).
    weight: Vec<Tensor>,
    /// List of weights for a model (previous value).
    weight_prev: Vec<Tensor>,
}

impl<R: Learn> Solver<R> {
    /// Creates a solver with the given update rule and cadences.
    ///
    /// A cadence of 0 means "every step": the counters are
    /// increment-then-compare, so the trigger condition is always met.
    pub fn new(
        rule: R,
        print_each: usize,
        test_each: usize,
        save_each: usize,
        lr_scale_each: usize,
        lr_scale: f32,
    ) -> Self {
        Solver {
            rule,
            print_each,
            test_each,
            save_each,
            lr_scale_each,
            lr_scale,
            weight: Vec::new(),
            weight_prev: Vec::new(),
        }
    }

    /// Trains `model` for `num_step` steps.
    ///
    /// Each step runs one full forward+backward pass (`model.train()`),
    /// applies the update rule, then services the print/test/save and
    /// learning-rate-decay cadences. Print, test and save also fire on
    /// the final step regardless of their counters; the decay cadence has
    /// no final-step special case.
    ///
    /// # Errors
    /// A failing checkpoint save aborts the loop immediately and
    /// propagates; later steps do not execute. The weight snapshot lists
    /// are cleared on every exit path.
    pub fn train(
        &mut self,
        model: &mut dyn Model,
        num_step: usize,
        learning_rate: f32,
    ) -> Result<(), GradNetError> {
        // Snapshot the model weights and allocate the previous-value
        // tensors: size-matched, zero-filled, never aliasing the live
        // weights.
        self.weight.clear();
        model.collect_weights(&mut self.weight);
        self.weight_prev = self
            .weight
            .iter()
            .map(create::zeros_like)
            .collect::<Result<Vec<_>, _>>()?;

        let result = self.run(model, num_step, learning_rate);

        // Clear the weights
        self.weight.clear();
        self.weight_prev.clear();

        result
    }

    fn run(
        &mut self,
        model: &mut dyn Model,
        num_step: usize,
        mut learning_rate: f32,
    ) -> Result<(), GradNetError> {
        let mut print = 0;
        let mut test = 0;
        let mut save = 0;
        let mut lr = 0;
        for step in 0..num_step {
            let loss = model.train();
            {
                let Solver {
                    rule,
                    weight,
                    weight_prev,
                    ..
                } = self;
                rule.learn(weight, weight_prev, learning_rate);
            }

            let last_step = step + 1 == num_step;

            print += 1;
            if print >= self.print_each || last_step {
                log::info!(
                    "step {}: lr = {}, loss = {}",
                    step + 1,
                    learning_rate,
                    loss
                );
                print = 0;
            }

            test += 1;
            if test >= self.test_each || last_step {
                log::info!("step {}: accuracy = {}", step + 1, model.test());
                test = 0;
            }

            save += 1;
            if save >= self.save_each || last_step {
                let file_name = format!("{}_{}.model", model.name(), step + 1);
                model.save(&file_name)?;
                save = 0;
            }

            lr += 1;
            if lr >= self.lr_scale_each {
                let scaled = learning_rate * self.lr_scale;
                log::info!(
                    "step {}: update learning rate from {} to {}, scale {}",
                    step + 1,
                    learning_rate,
                    scaled,
                    self.lr_scale
                );
                learning_rate = scaled;
                lr = 0;
            }
        }

        Ok(())
    }
}
