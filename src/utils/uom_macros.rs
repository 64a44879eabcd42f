#![warn(missing_docs)]
//! Module for additional uom macros that facilitate the creation of unit values and points

///macro to create a Length in meter
#[macro_export]
macro_rules! meter {
    ($x:expr) => {{
        use uom::si::{f64::Length, length::meter};
        Length::new::<meter>($x)
    }};
    ($x:expr, $y:expr, $z:expr) => {{
        use nalgebra::Point3;
        Point3::new($crate::meter!($x), $crate::meter!($y), $crate::meter!($z))
    }};
}
///macro to create a Length in millimeter
#[macro_export]
macro_rules! millimeter {
    ($x:expr) => {{
        use uom::si::{f64::Length, length::millimeter};
        Length::new::<millimeter>($x)
    }};
    ($x:expr, $y:expr, $z:expr) => {{
        use nalgebra::Point3;
        Point3::new(
            $crate::millimeter!($x),
            $crate::millimeter!($y),
            $crate::millimeter!($z),
        )
    }};
}
///macro to create a Length in micrometer
#[macro_export]
macro_rules! micrometer {
    ($x:expr) => {{
        use uom::si::{f64::Length, length::micrometer};
        Length::new::<micrometer>($x)
    }};
    ($x:expr, $y:expr, $z:expr) => {{
        use nalgebra::Point3;
        Point3::new(
            $crate::micrometer!($x),
            $crate::micrometer!($y),
            $crate::micrometer!($z),
        )
    }};
}
///macro to create an Angle in radian
#[macro_export]
macro_rules! radian {
    ($x:expr) => {{
        use uom::si::{angle::radian, f64::Angle};
        Angle::new::<radian>($x)
    }};
}
///macro to create an Angle in degree
#[macro_export]
macro_rules! degree {
    ($x:expr) => {{
        use uom::si::{angle::degree, f64::Angle};
        Angle::new::<degree>($x)
    }};
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use uom::si::{angle::radian, length::meter};

    #[test]
    fn length_scalar() {
        assert_relative_eq!(meter!(1.5).get::<meter>(), 1.5);
        assert_relative_eq!(millimeter!(1.0).get::<meter>(), 0.001);
        assert_relative_eq!(micrometer!(1.0).get::<meter>(), 1e-6);
    }
    #[test]
    fn length_point() {
        let p = millimeter!(1.0, 2.0, 3.0);
        assert_relative_eq!(p.x.get::<meter>(), 0.001);
        assert_relative_eq!(p.y.get::<meter>(), 0.002);
        assert_relative_eq!(p.z.get::<meter>(), 0.003);
    }
    #[test]
    fn angle() {
        assert_relative_eq!(degree!(180.0).get::<radian>(), PI);
        assert_relative_eq!(radian!(PI).get::<radian>(), PI);
    }
}
