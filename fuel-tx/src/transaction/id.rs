use crate::crypto::Hasher;
use crate::{Input, Metadata, Output, Transaction, Witness};

use fuel_types::bytes::SerializableVec;
use fuel_types::Bytes32;

impl Transaction {
    pub(crate) fn inputs_mut(&mut self) -> &mut [Input] {
        match self {
            Self::Script { inputs, .. } => inputs.as_mut_slice(),
            Self::Create { inputs, .. } => inputs.as_mut_slice(),
        }
    }

    pub(crate) fn outputs_mut(&mut self) -> &mut [Output] {
        match self {
            Self::Script { outputs, .. } => outputs.as_mut_slice(),
            Self::Create { outputs, .. } => outputs.as_mut_slice(),
        }
    }

    pub(crate) fn witnesses_mut(&mut self) -> &mut [Witness] {
        match self {
            Self::Script { witnesses, .. } => witnesses.as_mut_slice(),
            Self::Create { witnesses, .. } => witnesses.as_mut_slice(),
        }
    }

    pub fn id(&self) -> Bytes32 {
        self.metadata()
            .map(Metadata::id)
            .copied()
            .unwrap_or(self._id())
    }

    pub(crate) fn _id(&self) -> Bytes32 {
        let mut tx = self.clone();
        tx.prepare_sign();

        Hasher::hash(tx.to_bytes().as_slice())
    }

    fn prepare_sign(&mut self) {
        self.set_receipts_root(Default::default());

        self.inputs_mut().iter_mut().for_each(|input| {
            if let Input::Contract {
                utxo_id,
                balance_root,
                state_root,
                ..
            } = input
            {
                utxo_id.iter_mut().for_each(|b| *b = 0);
                balance_root.iter_mut().for_each(|b| *b = 0);
                state_root.iter_mut().for_each(|b| *b = 0);
            }
        });

        self.outputs_mut()
            .iter_mut()
            .for_each(|output| match output {
                Output::Contract {
                    balance_root,
                    state_root,
                    ..
                } => {
                    balance_root.iter_mut().for_each(|b| *b = 0);
                    state_root.iter_mut().for_each(|b| *b = 0);
                }

                Output::Change { amount, .. } => *amount = 0,

                Output::Variable {
                    to, amount, color, ..
                } => {
                    to.iter_mut().for_each(|b| *b = 0);
                    *amount = 0;
                    color.iter_mut().for_each(|b| *b = 0);
                }

                _ => (),
            });
    }
}
