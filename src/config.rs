use std::fmt;

use crate::RotationControllerDescriptor;
use crate::error::{DragspinError, DragspinResult};


/// Parsing states.
enum Parse {
    None,
    Damping,
    Slowing,
    Reduction,
    Epsilon,
}


/// User defined tuning settings for the demo.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub controller: RotationControllerDescriptor,
}
impl Config {
    /// Create a new Config with the specified command line arguments.
    pub fn new(args: Vec<String>) -> DragspinResult<Config> {
        let mut parser = Parse::None;
        let mut cfg    = Config::default();

        for arg in args.into_iter() {
            match arg.as_str() {
                "-damping" => {
                    parser = Parse::Damping;
                    continue;
                }
                "-slowing" => {
                    parser = Parse::Slowing;
                    continue;
                }
                "-reduction" => {
                    parser = Parse::Reduction;
                    continue;
                }
                "-epsilon" => {
                    parser = Parse::Epsilon;
                    continue;
                }
                _ => {},
            }
            match parser {
                Parse::Damping => {
                    if let Ok(damping) = arg.parse::<f64>() {
                        cfg.controller.fling_damping = damping;
                    }
                    else {
                        return Err(
                            DragspinError::InvalidDamping(arg.clone())
                        );
                    }
                }
                Parse::Slowing => {
                    if let Ok(slowing) = arg.parse::<f64>() {
                        cfg.controller.drag_slowing = slowing;
                    }
                    else {
                        return Err(
                            DragspinError::InvalidDragSlowing(arg.clone())
                        );
                    }
                }
                Parse::Reduction => {
                    if let Ok(reduction) = arg.parse::<f64>() {
                        cfg.controller.fling_reduction = reduction;
                    }
                    else {
                        return Err(
                            DragspinError::InvalidFlingReduction(arg.clone())
                        );
                    }
                }
                Parse::Epsilon => {
                    if let Ok(epsilon) = arg.parse::<f64>() {
                        cfg.controller.fling_epsilon = epsilon;
                    }
                    else {
                        return Err(
                            DragspinError::InvalidFlingEpsilon(arg.clone())
                        );
                    }
                }
                Parse::None => {
                    return Err(
                        DragspinError::UnknownArg(arg.clone())
                    );
                }
            }
            parser = Parse::None;
        }
        Ok(cfg)
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "
            \rRotation Controller
            \r=============================================================
            \rDrag Slowing: {},
            \rFling Reduction: {},
            \rFling Damping: {},
            \rFling Epsilon: {}",
            self.controller.drag_slowing,
            self.controller.fling_reduction,
            self.controller.fling_damping,
            self.controller.fling_epsilon,
        )
    }
}


#[cfg(test)]
fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_args_give_defaults() {
    let cfg = Config::new(Vec::new()).unwrap();
    assert!(cfg.controller.drag_slowing == crate::controller::DRAG_SLOWING);
    assert!(cfg.controller.fling_damping == crate::controller::FLING_DAMPING);
}

#[test]
fn flags_override_defaults() {
    let cfg = Config::new(args(&["-damping", "0.9", "-slowing", "120"])).unwrap();
    assert!(cfg.controller.fling_damping == 0.9);
    assert!(cfg.controller.drag_slowing == 120.0);
    assert!(cfg.controller.fling_reduction == crate::controller::FLING_REDUCTION);
}

#[test]
fn bad_value_is_rejected() {
    assert!(Config::new(args(&["-damping", "quick"])).is_err());
}

#[test]
fn unknown_arg_is_rejected() {
    assert!(Config::new(args(&["-dampening", "0.9"])).is_err());
}
