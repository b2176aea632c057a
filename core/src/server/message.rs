//! Values accepted by `StreamEncoder::write`: one string or an ordered sequence of them.

pub trait Message {
    /// Visit each value in order.
    fn for_each_value(&self, f: &mut dyn FnMut(&str));
}

impl Message for str {
    fn for_each_value(&self, f: &mut dyn FnMut(&str)) {
        f(self)
    }
}

impl Message for String {
    fn for_each_value(&self, f: &mut dyn FnMut(&str)) {
        f(self)
    }
}

impl<S: AsRef<str>> Message for [S] {
    fn for_each_value(&self, f: &mut dyn FnMut(&str)) {
        self.iter().for_each(|v| f(v.as_ref()))
    }
}

impl<S: AsRef<str>, const N: usize> Message for [S; N] {
    fn for_each_value(&self, f: &mut dyn FnMut(&str)) {
        self.as_slice().for_each_value(f)
    }
}

impl<S: AsRef<str>> Message for Vec<S> {
    fn for_each_value(&self, f: &mut dyn FnMut(&str)) {
        self.as_slice().for_each_value(f)
    }
}
