use ndarray::{Array1, ArrayView1, Zip};
use serde::{Deserialize, Serialize};

use crate::solver::FlowParameters;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveState {
    pub pressure: f64,
    pub temperature: f64,
    pub velocity: f64,
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConservativeState {
    pub density: f64,
    pub momentum: f64,
    pub total_energy: f64,
}
#[derive(Clone, Debug)]
pub struct PrimitiveField {
    pub pressure: Array1<f64>,
    pub temperature: Array1<f64>,
    pub velocity: Array1<f64>,
}
impl PrimitiveField {
    pub fn new(pressure: Array1<f64>, temperature: Array1<f64>, velocity: Array1<f64>) -> Self {
        Self {
            pressure,
            temperature,
            velocity,
        }
    }
    pub fn uniform(n: usize, state: PrimitiveState) -> Self {
        Self {
            pressure: Array1::from_elem(n, state.pressure),
            temperature: Array1::from_elem(n, state.temperature),
            velocity: Array1::from_elem(n, state.velocity),
        }
    }
    pub fn len(&self) -> usize {
        self.pressure.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }
}
#[derive(Clone, Debug)]
pub struct ConservativeField {
    pub density: Array1<f64>,
    pub momentum: Array1<f64>,
    pub total_energy: Array1<f64>,
}

/// Calorically perfect ideal gas, `p = rho R T` and `e = cv T` with `cv = cp / gamma`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealGas {
    pub gamma: f64,
    pub gas_constant: f64,
    pub cp: f64,
}
impl IdealGas {
    pub fn new(flow_param: &FlowParameters) -> Self {
        Self {
            gamma: flow_param.gamma,
            gas_constant: flow_param.gas_constant,
            cp: flow_param.cp,
        }
    }
    pub fn cv(&self) -> f64 {
        self.cp / self.gamma
    }
    pub fn density(&self, temperature: f64, pressure: f64) -> f64 {
        pressure / (self.gas_constant * temperature)
    }
    pub fn pressure(&self, density: f64, temperature: f64) -> f64 {
        density * self.gas_constant * temperature
    }
    pub fn internal_energy(&self, temperature: f64) -> f64 {
        self.cv() * temperature
    }
    pub fn temperature(&self, internal_energy: f64) -> f64 {
        internal_energy / self.cv()
    }
    pub fn sound_speed(&self, temperature: f64) -> f64 {
        (self.gamma * self.gas_constant * temperature).sqrt()
    }
    pub fn encode(&self, prim: PrimitiveState) -> ConservativeState {
        let density = self.density(prim.temperature, prim.pressure);
        let specific_total =
            self.internal_energy(prim.temperature) + 0.5 * prim.velocity * prim.velocity;
        ConservativeState {
            density,
            momentum: density * prim.velocity,
            total_energy: density * specific_total,
        }
    }
    pub fn decode(&self, cons: ConservativeState) -> PrimitiveState {
        let velocity = cons.momentum / cons.density;
        let internal_energy = cons.total_energy / cons.density - 0.5 * velocity * velocity;
        let temperature = self.temperature(internal_energy);
        PrimitiveState {
            pressure: self.pressure(cons.density, temperature),
            temperature,
            velocity,
        }
    }
    pub fn density_field(
        &self,
        temperature: ArrayView1<f64>,
        pressure: ArrayView1<f64>,
    ) -> Array1<f64> {
        Zip::from(temperature)
            .and(pressure)
            .map_collect(|&t, &p| self.density(t, p))
    }
    pub fn encode_field(&self, prim: &PrimitiveField) -> ConservativeField {
        let n = prim.len();
        let mut cons = ConservativeField {
            density: Array1::zeros(n),
            momentum: Array1::zeros(n),
            total_energy: Array1::zeros(n),
        };
        for i in 0..n {
            let q = self.encode(PrimitiveState {
                pressure: prim.pressure[i],
                temperature: prim.temperature[i],
                velocity: prim.velocity[i],
            });
            cons.density[i] = q.density;
            cons.momentum[i] = q.momentum;
            cons.total_energy[i] = q.total_energy;
        }
        cons
    }
    pub fn decode_field(&self, cons: &ConservativeField) -> PrimitiveField {
        let n = cons.density.len();
        let mut prim = PrimitiveField::uniform(
            n,
            PrimitiveState {
                pressure: 0.0,
                temperature: 0.0,
                velocity: 0.0,
            },
        );
        for i in 0..n {
            let w = self.decode(ConservativeState {
                density: cons.density[i],
                momentum: cons.momentum[i],
                total_energy: cons.total_energy[i],
            });
            prim.pressure[i] = w.pressure;
            prim.temperature[i] = w.temperature;
            prim.velocity[i] = w.velocity;
        }
        prim
    }
}
