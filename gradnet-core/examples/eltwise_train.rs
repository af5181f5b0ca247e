// Minimal end-to-end demo: learn a gating vector w so that x . w matches
// a target, using the element-wise multiply layer and the momentum SGD
// solver.
//
// Run with: cargo run --example eltwise_train

use gradnet_core::config::Param;
use gradnet_core::layers::{Layer, LayerDropout, LayerEltwiseMul};
use gradnet_core::solver::{SgdSolver, Solver};
use gradnet_core::tensor::create;
use gradnet_core::{GradNetError, Model, State, Tensor};

struct ProductGate {
    name: String,
    x: Tensor,
    w: Tensor,
    out: Tensor,
    target: Vec<f32>,
    mul: LayerEltwiseMul,
    drop: LayerDropout,
}

impl ProductGate {
    fn new(name: &str) -> Result<Self, GradNetError> {
        let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![4])?;
        let w = create::randn(&[4])?;
        let target = vec![2.0, -1.0, 0.5, 3.0];

        let mul = LayerEltwiseMul::new("gate", vec![x.clone(), w.clone()])?;
        let drop = LayerDropout::new(
            "drop",
            vec![mul.outputs()[0].clone()],
            &Param::new().with("drop_prob", 0.0),
        )?;
        let out = drop.outputs()[0].clone();

        Ok(ProductGate {
            name: name.to_string(),
            x,
            w,
            out,
            target,
            mul,
            drop,
        })
    }

    fn loss_and_seed(&self, seed: bool) -> f32 {
        let out = self.out.get_data();
        let n = out.len() as f32;
        let mut loss = 0.0;
        let mut guard = self.out.write_data();
        for i in 0..out.len() {
            let diff = out[i] - self.target[i];
            loss += diff * diff / n;
            if seed {
                guard.deriv_mut()[i] += 2.0 * diff / n;
            }
        }
        loss
    }
}

impl Model for ProductGate {
    fn name(&self) -> &str {
        &self.name
    }

    fn train(&mut self) -> f32 {
        let state = State::train();

        self.mul.clear_deriv();
        self.drop.clear_deriv();
        self.x.zero_deriv();
        self.w.zero_deriv();

        self.mul.forward(&state);
        self.drop.forward(&state);

        let loss = self.loss_and_seed(true);

        self.drop.backward(&state);
        self.mul.backward(&state);

        loss
    }

    fn test(&mut self) -> f32 {
        let state = State::test();
        self.mul.forward(&state);
        self.drop.forward(&state);
        1.0 / (1.0 + self.loss_and_seed(false))
    }

    fn collect_weights(&self, out: &mut Vec<Tensor>) {
        out.push(self.w.clone());
    }

    fn save(&self, path: &str) -> Result<(), GradNetError> {
        let full = std::env::temp_dir().join(path);
        std::fs::write(&full, format!("{:?}", self.w.get_data())).map_err(|e| {
            GradNetError::SaveError {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

fn main() -> Result<(), GradNetError> {
    let mut model = ProductGate::new("eltwise_demo")?;

    println!("initial w: {:?}", model.w.get_data());
    println!("initial loss: {}", model.train());

    let mut solver = Solver::new(SgdSolver::new(0.5), 200, 10_000, 10_000, 10_000, 1.0);
    solver.train(&mut model, 1000, 0.02)?;

    println!("final w: {:?}", model.w.get_data());
    println!(
        "target w: {:?}",
        model
            .target
            .iter()
            .zip(model.x.get_data())
            .map(|(t, x)| t / x)
            .collect::<Vec<_>>()
    );
    println!("final accuracy: {}", model.test());

    Ok(())
}
